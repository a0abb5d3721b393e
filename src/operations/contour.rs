//! Outer boundary of a disk configuration.
//!
//! Two interchangeable algorithms sit behind one operation, selected by
//! an explicit [`ContourStrategy`] at call time:
//!
//! - **GiftWrap** — for non-overlapping sets: Jarvis march on the disk
//!   centers, one CCW outer tangent per hull edge, connecting boundary
//!   arcs between them.
//! - **ExposedArcs** — for overlapping sets (union boundary): each
//!   disk's boundary is cut at every circle-circle intersection, the
//!   cut intervals whose midpoints lie outside all other disks are kept
//!   as exposed arcs, and the arcs are chained end-to-start through a
//!   position index with quantized keys. Among the resulting chains the
//!   one with the most arcs is taken as the outer boundary (the
//!   largest-chain heuristic; a winding-number test would be exact).
//!
//! `Auto` picks ExposedArcs exactly when some pair of interiors
//! overlaps.

use std::collections::HashMap;

use crate::geometry::disk::{Disk, DiskId, DiskSet};
use crate::geometry::envelope::{ArcSegment, Chirality, EnvelopeSegment};
use crate::geometry::tangent::{bitangents, TangentKind, TangentSegment};
use crate::math::intersect_2d::circle_circle_intersect_2d;
use crate::math::{Point2, CHAIN_QUANTUM, TOLERANCE};

/// Algorithm selection for [`OuterContour`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourStrategy {
    /// Exposed-arc union boundary when any interiors overlap, convex
    /// wrap otherwise.
    #[default]
    Auto,
    /// Convex wrap (Jarvis march + outer tangents), regardless of
    /// overlap.
    GiftWrap,
    /// Exposed-arc union boundary, regardless of overlap.
    ExposedArcs,
}

/// Outer-boundary operation over a disk set.
#[derive(Debug)]
pub struct OuterContour<'a> {
    set: &'a DiskSet,
    strategy: ContourStrategy,
}

impl<'a> OuterContour<'a> {
    /// Creates the operation with the [`ContourStrategy::Auto`] policy.
    #[must_use]
    pub fn new(set: &'a DiskSet) -> Self {
        Self {
            set,
            strategy: ContourStrategy::Auto,
        }
    }

    /// Overrides the algorithm selection.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ContourStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Computes the outer boundary. Empty input gives an empty contour.
    #[must_use]
    pub fn execute(&self) -> Vec<EnvelopeSegment> {
        let exposed = match self.strategy {
            ContourStrategy::Auto => self.set.any_overlap(),
            ContourStrategy::GiftWrap => false,
            ContourStrategy::ExposedArcs => true,
        };
        if exposed {
            self.exposed_arcs()
        } else {
            self.gift_wrap()
        }
    }

    // --- convex wrap ---

    fn gift_wrap(&self) -> Vec<EnvelopeSegment> {
        let disks = uncovered_disks(self.set);
        match disks.len() {
            0 => return Vec::new(),
            1 => {
                let (id, disk) = disks[0];
                return vec![EnvelopeSegment::Arc(full_circle(id, &disk))];
            }
            _ => {}
        }

        let hull = jarvis_march(&disks);
        if hull.len() < 2 {
            return Vec::new();
        }

        // One CCW outer tangent per hull edge.
        let mut tangents: Vec<TangentSegment> = Vec::with_capacity(hull.len());
        for i in 0..hull.len() {
            let (a_id, a) = hull[i];
            let (b_id, b) = hull[(i + 1) % hull.len()];
            let Some(t) = bitangents(a_id, &a, b_id, &b)
                .into_iter()
                .find(|t| t.kind() == TangentKind::OuterLeft && !t.is_sentinel())
            else {
                tracing::debug!(from = ?a_id, to = ?b_id, "hull edge without outer tangent");
                return Vec::new();
            };
            tangents.push(t);
        }

        // Interleave with connecting arcs; the arc at the start disk
        // closes the contour.
        let mut segments = Vec::with_capacity(2 * tangents.len());
        for i in 0..tangents.len() {
            segments.push(EnvelopeSegment::Tangent(tangents[i]));
            let next = &tangents[(i + 1) % tangents.len()];
            let (junction_id, junction) = hull[(i + 1) % hull.len()];
            segments.push(EnvelopeSegment::Arc(ArcSegment::new(
                junction_id,
                &junction,
                tangents[i].end_angle(),
                next.start_angle(),
                Chirality::Ccw,
            )));
        }
        segments
    }

    // --- union boundary ---

    fn exposed_arcs(&self) -> Vec<EnvelopeSegment> {
        let disks = uncovered_disks(self.set);
        if disks.is_empty() {
            return Vec::new();
        }

        let mut arcs: Vec<ArcSegment> = Vec::new();
        for &(id, disk) in &disks {
            collect_exposed(id, &disk, &disks, &mut arcs);
        }
        if arcs.is_empty() {
            return Vec::new();
        }

        let chains = chain_arcs(&arcs);
        let best = chains.into_iter().max_by(|a, b| {
            a.len().cmp(&b.len()).then_with(|| {
                let la: f64 = a.iter().map(ArcSegment::length).sum();
                let lb: f64 = b.iter().map(ArcSegment::length).sum();
                la.total_cmp(&lb)
            })
        });
        best.map_or_else(Vec::new, |chain| {
            chain.into_iter().map(EnvelopeSegment::Arc).collect()
        })
    }
}

/// Disks not fully contained in another disk. Identical duplicates keep
/// only their first occurrence.
fn uncovered_disks(set: &DiskSet) -> Vec<(DiskId, Disk)> {
    let all: Vec<(DiskId, Disk)> = set.iter().map(|(id, d)| (id, *d)).collect();
    all.iter()
        .enumerate()
        .filter(|(i, (_, disk))| {
            !all.iter().enumerate().any(|(j, (_, other))| {
                if *i == j || !other.contains_disk(disk) {
                    return false;
                }
                // Mutual containment means identical circles; the
                // earlier one survives.
                !disk.contains_disk(other) || j < *i
            })
        })
        .map(|(_, pair)| *pair)
        .collect()
}

fn full_circle(id: DiskId, disk: &Disk) -> ArcSegment {
    ArcSegment::new(id, disk, std::f64::consts::PI, std::f64::consts::PI, Chirality::Ccw)
}

/// Gift-wrapping march over disk centers, counter-clockwise.
fn jarvis_march(disks: &[(DiskId, Disk)]) -> Vec<(DiskId, Disk)> {
    let start = match disks.iter().enumerate().min_by(|(_, (_, a)), (_, (_, b))| {
        a.center()
            .x
            .total_cmp(&b.center().x)
            .then(a.center().y.total_cmp(&b.center().y))
    }) {
        Some((i, _)) => i,
        None => return Vec::new(),
    };

    let mut hull: Vec<usize> = Vec::new();
    let mut current = start;
    loop {
        hull.push(current);
        let cur = disks[current].1.center();
        let mut next = (current + 1) % disks.len();
        for candidate in 0..disks.len() {
            if candidate == current {
                continue;
            }
            let n = disks[next].1.center();
            let c = disks[candidate].1.center();
            let cross = (n.x - cur.x) * (c.y - cur.y) - (n.y - cur.y) * (c.x - cur.x);
            let farther = (c - cur).norm() > (n - cur).norm();
            if next == current || cross < -TOLERANCE || (cross.abs() <= TOLERANCE && farther) {
                next = candidate;
            }
        }
        current = next;
        if current == start || hull.len() > disks.len() {
            break;
        }
    }
    hull.into_iter().map(|i| disks[i]).collect()
}

/// Emits the exposed boundary arcs of one disk into `arcs`.
fn collect_exposed(id: DiskId, disk: &Disk, disks: &[(DiskId, Disk)], arcs: &mut Vec<ArcSegment>) {
    let mut cuts: Vec<f64> = Vec::new();
    for (other_id, other) in disks {
        if *other_id == id {
            continue;
        }
        for p in circle_circle_intersect_2d(disk.center(), disk.radius(), other.center(), other.radius())
        {
            cuts.push(disk.angle_of(&p));
        }
    }

    if cuts.is_empty() {
        // Untouched boundary: the whole circle is exposed (coverage was
        // already ruled out upstream).
        arcs.push(full_circle(id, disk));
        return;
    }

    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|a, b| (*a - *b).abs() < 1e-9);

    let n = cuts.len();
    for k in 0..n {
        let a0 = cuts[k];
        let a1 = if k + 1 < n {
            cuts[k + 1]
        } else {
            cuts[0] + 2.0 * std::f64::consts::PI
        };
        if a1 - a0 < 1e-9 {
            continue;
        }
        let midpoint = disk.point_at(0.5 * (a0 + a1));
        let hidden = disks
            .iter()
            .any(|(other_id, other)| *other_id != id && other.contains_point(&midpoint));
        if !hidden {
            arcs.push(ArcSegment::new(id, disk, a0, a1, Chirality::Ccw));
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(p: &Point2) -> (i64, i64) {
    let x = (p.x / CHAIN_QUANTUM).round() as i64;
    let y = (p.y / CHAIN_QUANTUM).round() as i64;
    (x, y)
}

/// Chains exposed arcs end-to-start via a quantized position index,
/// preferring a transition onto a different disk at each junction.
fn chain_arcs(arcs: &[ArcSegment]) -> Vec<Vec<ArcSegment>> {
    let mut by_start: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, arc) in arcs.iter().enumerate() {
        by_start.entry(quantize(&arc.start_point())).or_default().push(i);
    }

    let mut used = vec![false; arcs.len()];
    let mut chains: Vec<Vec<ArcSegment>> = Vec::new();

    for seed in 0..arcs.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut chain = vec![arcs[seed]];
        let mut cursor = seed;

        loop {
            let key = quantize(&arcs[cursor].end_point());
            let Some(candidates) = by_start.get(&key) else {
                break;
            };
            let next = candidates
                .iter()
                .filter(|&&i| !used[i])
                .max_by_key(|&&i| usize::from(arcs[i].disk() != arcs[cursor].disk()))
                .copied();
            let Some(next) = next else {
                break;
            };
            used[next] = true;
            chain.push(arcs[next]);
            cursor = next;
        }
        chains.push(chain);
    }
    chains
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn set_of(coords: &[(f64, f64, f64)]) -> DiskSet {
        let mut set = DiskSet::new();
        for &(x, y, r) in coords {
            set.insert(Disk::new(Point2::new(x, y), r).unwrap());
        }
        set
    }

    fn arc_count(segments: &[EnvelopeSegment]) -> usize {
        segments
            .iter()
            .filter(|s| matches!(s, EnvelopeSegment::Arc(_)))
            .count()
    }

    #[test]
    fn empty_and_single_disk() {
        let empty = DiskSet::new();
        assert!(OuterContour::new(&empty).execute().is_empty());

        let one = set_of(&[(1.0, 1.0, 2.0)]);
        let contour = OuterContour::new(&one).execute();
        assert_eq!(contour.len(), 1);
        assert!((contour[0].length() - 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn disjoint_pair_wraps_with_tangents() {
        let set = set_of(&[(0.0, 0.0, 1.0), (5.0, 0.0, 1.0)]);
        let contour = OuterContour::new(&set).execute();
        let tangents = contour.len() - arc_count(&contour);
        assert_eq!(tangents, 2, "contour={contour:?}");
        assert_eq!(arc_count(&contour), 2);

        // Both connecting arcs are semicircles here.
        let sweep: f64 = contour
            .iter()
            .filter_map(|s| match s {
                EnvelopeSegment::Arc(a) => Some(a.sweep()),
                EnvelopeSegment::Tangent(_) => None,
            })
            .sum();
        assert!((sweep - 2.0 * PI).abs() < 1e-9);

        for window in contour.windows(2) {
            let gap = (window[0].end_point() - window[1].start_point()).norm();
            assert!(gap < 1e-6, "gap={gap}");
        }
    }

    #[test]
    fn overlapping_pair_union_boundary() {
        let set = set_of(&[(0.0, 0.0, 2.0), (3.0, 0.0, 2.0)]);
        let contour = OuterContour::new(&set).execute();
        assert_eq!(contour.len(), 2, "contour={contour:?}");
        assert!(contour.iter().all(|s| matches!(s, EnvelopeSegment::Arc(_))));

        // The two arcs live on different disks and meet at the two
        // circle intersection points.
        let EnvelopeSegment::Arc(a) = &contour[0] else { unreachable!() };
        let EnvelopeSegment::Arc(b) = &contour[1] else { unreachable!() };
        assert_ne!(a.disk(), b.disk());
        assert!((a.end_point() - b.start_point()).norm() < 2.0 * CHAIN_QUANTUM);
        assert!((b.end_point() - a.start_point()).norm() < 2.0 * CHAIN_QUANTUM);
    }

    #[test]
    fn three_disk_chain_union_boundary() {
        // A row of three overlapping disks: the middle one is exposed
        // only above and below, so the boundary carries four arcs.
        let set = set_of(&[(0.0, 0.0, 2.0), (3.0, 0.0, 2.0), (6.0, 0.0, 2.0)]);
        let contour = OuterContour::new(&set).execute();
        assert_eq!(contour.len(), 4, "contour={contour:?}");
        for window in contour.windows(2) {
            let gap = (window[0].end_point() - window[1].start_point()).norm();
            assert!(gap < 2.0 * CHAIN_QUANTUM, "gap={gap}");
        }
    }

    #[test]
    fn covered_disk_contributes_nothing() {
        let set = set_of(&[(0.0, 0.0, 3.0), (1.0, 0.0, 1.0), (4.0, 0.0, 2.0)]);
        let contour = OuterContour::new(&set)
            .with_strategy(ContourStrategy::ExposedArcs)
            .execute();
        assert!(!contour.is_empty());
        for s in &contour {
            if let EnvelopeSegment::Arc(a) = s {
                // The covered small disk never appears.
                assert!(a.radius() > 1.0 + 1e-9, "covered disk leaked: {a:?}");
            }
        }
    }

    #[test]
    fn strategy_override_is_respected() {
        // Overlapping set, forced wrap: tangents appear anyway.
        let set = set_of(&[(0.0, 0.0, 2.0), (3.0, 0.0, 2.0)]);
        let wrapped = OuterContour::new(&set)
            .with_strategy(ContourStrategy::GiftWrap)
            .execute();
        assert!(wrapped
            .iter()
            .any(|s| matches!(s, EnvelopeSegment::Tangent(_))));

        // Disjoint set, forced exposed arcs: each disk is its own
        // chain, the larger one wins.
        let disjoint = set_of(&[(0.0, 0.0, 1.0), (10.0, 0.0, 3.0)]);
        let arcs = OuterContour::new(&disjoint)
            .with_strategy(ContourStrategy::ExposedArcs)
            .execute();
        assert_eq!(arcs.len(), 1);
        assert!((arcs[0].length() - 6.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn triangle_of_disjoint_disks_closes() {
        let h = 30.0 * 3.0_f64.sqrt() / 2.0;
        let set = set_of(&[(0.0, 0.0, 10.0), (30.0, 0.0, 10.0), (15.0, h, 10.0)]);
        let contour = OuterContour::new(&set).execute();
        assert_eq!(contour.len(), 6, "contour={contour:?}");
        let first = contour.first().unwrap().start_point();
        let last = contour.last().unwrap().end_point();
        assert!((first - last).norm() < 1e-6);
    }
}
