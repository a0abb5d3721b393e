//! Bitangent construction for ordered disk pairs.
//!
//! For disks `(a, b)` with center distance `D` and radii `r1`, `r2`:
//!
//! - outer tangents exist when `D >= |r1 - r2|`; the shared normal angle
//!   is `phi -/+ gamma` with `gamma = acos((r1 - r2) / D)`,
//! - inner (crossing) tangents exist when `D >= r1 + r2`; the normal at
//!   the start disk is `phi -/+ beta` with `beta = acos((r1 + r2) / D)`
//!   and the far normal is opposite.
//!
//! The minus sign belongs to the `L...` kinds: travelling from `a` to
//! `b`, a CCW start disk sits to the left of the tangent direction.
//! Both `acos` arguments are clamped so exact tangency never produces
//! NaN.

use crate::math::{angle::clamped_acos, Point2, GEOM_EPS, TOLERANCE};

use super::disk::{Disk, DiskId};
use super::envelope::Chirality;

/// The four canonical bitangent classes, named by the turning sense at
/// the start and end disk (`L` = CCW, `R` = CW, `S` = the straight part).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TangentKind {
    /// Outer tangent, CCW at both disks (`LSL`).
    OuterLeft,
    /// Outer tangent, CW at both disks (`RSR`).
    OuterRight,
    /// Inner crossing tangent, CCW at the start, CW at the end (`LSR`).
    InnerLeftRight,
    /// Inner crossing tangent, CW at the start, CCW at the end (`RSL`).
    InnerRightLeft,
}

impl TangentKind {
    /// All four kinds, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::OuterLeft,
        Self::OuterRight,
        Self::InnerLeftRight,
        Self::InnerRightLeft,
    ];

    /// Turning sense at the start disk (the first letter).
    #[must_use]
    pub fn start_chirality(self) -> Chirality {
        match self {
            Self::OuterLeft | Self::InnerLeftRight => Chirality::Ccw,
            Self::OuterRight | Self::InnerRightLeft => Chirality::Cw,
        }
    }

    /// Turning sense at the end disk (the last letter).
    #[must_use]
    pub fn end_chirality(self) -> Chirality {
        match self {
            Self::OuterLeft | Self::InnerRightLeft => Chirality::Ccw,
            Self::OuterRight | Self::InnerLeftRight => Chirality::Cw,
        }
    }

    /// Whether this is one of the two crossing (inner) classes.
    #[must_use]
    pub fn is_inner(self) -> bool {
        matches!(self, Self::InnerLeftRight | Self::InnerRightLeft)
    }

    /// Three-letter alias (`LSL`, `RSR`, `LSR`, `RSL`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OuterLeft => "LSL",
            Self::OuterRight => "RSR",
            Self::InnerLeftRight => "LSR",
            Self::InnerRightLeft => "RSL",
        }
    }
}

/// A directed straight segment tangent to two disks.
///
/// `start` lies on the start disk's boundary at polar angle
/// `start_angle`, symmetrically for `end` — except for *sentinel*
/// segments, whose endpoints sit at the disk centers instead (see
/// [`bitangents`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentSegment {
    kind: TangentKind,
    start_disk: DiskId,
    end_disk: DiskId,
    start: Point2,
    end: Point2,
    start_angle: f64,
    end_angle: f64,
    length: f64,
    sentinel: bool,
}

impl TangentSegment {
    /// The bitangent class.
    #[must_use]
    pub fn kind(&self) -> TangentKind {
        self.kind
    }

    /// Disk the segment departs from.
    #[must_use]
    pub fn start_disk(&self) -> DiskId {
        self.start_disk
    }

    /// Disk the segment arrives at.
    #[must_use]
    pub fn end_disk(&self) -> DiskId {
        self.end_disk
    }

    /// Departure point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Arrival point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Polar angle of the departure point on the start disk.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Polar angle of the arrival point on the end disk.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether this is a degenerate center-to-center fallback edge.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }
}

/// Computes the bitangents from `a` to `b` (0 to 4 segments).
///
/// Degenerate cases:
///
/// - coincident centers: no segments;
/// - one disk inside the other (no real tangent exists): four sentinel
///   center-to-center edges, one per [`TangentKind`], so graph
///   connectivity survives. Sentinels are not valid geometry and must be
///   treated as a last resort by callers.
#[must_use]
pub fn bitangents(a_id: DiskId, a: &Disk, b_id: DiskId, b: &Disk) -> Vec<TangentSegment> {
    let delta = b.center() - a.center();
    let dist = delta.norm();
    if dist < TOLERANCE {
        return Vec::new();
    }

    let (r1, r2) = (a.radius(), b.radius());
    let phi = delta.y.atan2(delta.x);

    let outer_ok = dist >= (r1 - r2).abs() - GEOM_EPS;
    let inner_ok = dist >= r1 + r2 - GEOM_EPS;

    if !outer_ok && !inner_ok {
        return sentinel_edges(a_id, a, b_id, b, phi, dist);
    }

    let mut out = Vec::with_capacity(4);

    if outer_ok {
        let gamma = clamped_acos((r1 - r2) / dist);
        // Both tangent points share one normal angle on an outer tangent.
        out.push(tangent_from_normals(
            TangentKind::OuterLeft,
            a_id,
            a,
            b_id,
            b,
            phi - gamma,
            phi - gamma,
        ));
        out.push(tangent_from_normals(
            TangentKind::OuterRight,
            a_id,
            a,
            b_id,
            b,
            phi + gamma,
            phi + gamma,
        ));
    }

    if inner_ok {
        let beta = clamped_acos((r1 + r2) / dist);
        out.push(tangent_from_normals(
            TangentKind::InnerLeftRight,
            a_id,
            a,
            b_id,
            b,
            phi - beta,
            phi - beta + std::f64::consts::PI,
        ));
        out.push(tangent_from_normals(
            TangentKind::InnerRightLeft,
            a_id,
            a,
            b_id,
            b,
            phi + beta,
            phi + beta + std::f64::consts::PI,
        ));
    }

    out
}

fn tangent_from_normals(
    kind: TangentKind,
    a_id: DiskId,
    a: &Disk,
    b_id: DiskId,
    b: &Disk,
    start_normal: f64,
    end_normal: f64,
) -> TangentSegment {
    let start = a.point_at(start_normal);
    let end = b.point_at(end_normal);
    TangentSegment {
        kind,
        start_disk: a_id,
        end_disk: b_id,
        start,
        end,
        start_angle: start_normal,
        end_angle: end_normal,
        length: (end - start).norm(),
        sentinel: false,
    }
}

fn sentinel_edges(
    a_id: DiskId,
    a: &Disk,
    b_id: DiskId,
    b: &Disk,
    phi: f64,
    dist: f64,
) -> Vec<TangentSegment> {
    TangentKind::ALL
        .iter()
        .map(|&kind| TangentSegment {
            kind,
            start_disk: a_id,
            end_disk: b_id,
            start: *a.center(),
            end: *b.center(),
            start_angle: phi,
            end_angle: phi + std::f64::consts::PI,
            length: dist,
            sentinel: true,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::disk::DiskSet;

    fn pair(ax: f64, ay: f64, ar: f64, bx: f64, by: f64, br: f64) -> (DiskId, Disk, DiskId, Disk) {
        let mut set = DiskSet::new();
        let a = Disk::new(Point2::new(ax, ay), ar).unwrap();
        let b = Disk::new(Point2::new(bx, by), br).unwrap();
        (set.insert(a), a, set.insert(b), b)
    }

    fn on_boundary(p: &Point2, d: &Disk) -> bool {
        (((p - d.center()).norm()) - d.radius()).abs() < 1e-9
    }

    #[test]
    fn separated_pair_has_four_tangents_on_boundaries() {
        let (aid, a, bid, b) = pair(0.0, 0.0, 1.0, 5.0, 1.0, 2.0);
        let tangents = bitangents(aid, &a, bid, &b);
        assert_eq!(tangents.len(), 4);
        for t in &tangents {
            assert!(!t.is_sentinel());
            assert!(on_boundary(t.start(), &a), "{:?} start off boundary", t.kind());
            assert!(on_boundary(t.end(), &b), "{:?} end off boundary", t.kind());
            assert!(t.length().is_finite() && t.length() > 0.0);
        }
    }

    #[test]
    fn outer_tangent_is_perpendicular_to_normal() {
        let (aid, a, bid, b) = pair(0.0, 0.0, 1.0, 6.0, 0.0, 2.5);
        for t in bitangents(aid, &a, bid, &b) {
            if t.kind().is_inner() {
                continue;
            }
            // Segment direction must be perpendicular to the boundary
            // normal at both touch points.
            let dir = (t.end() - t.start()).normalize();
            let n = Point2::new(t.start_angle().cos(), t.start_angle().sin());
            let dot = dir.x * n.x + dir.y * n.y;
            assert!(dot.abs() < 1e-9, "{}: dot={dot}", t.kind().label());
        }
    }

    #[test]
    fn twin_disks_at_contact_distance() {
        // A=(0,0,r=10), B=(20,0,r=10): outer tangents are the horizontal
        // lines y = ±10 with length 20; inner tangents degenerate to the
        // contact point (D = r1 + r2 boundary case still yields segments,
        // of length 0, through (10, 0)).
        let (aid, a, bid, b) = pair(0.0, 0.0, 10.0, 20.0, 0.0, 10.0);
        let tangents = bitangents(aid, &a, bid, &b);
        assert_eq!(tangents.len(), 4);

        for t in &tangents {
            match t.kind() {
                TangentKind::OuterLeft => {
                    assert!((t.start().y + 10.0).abs() < 1e-9, "LSL start {:?}", t.start());
                    assert!((t.end().y + 10.0).abs() < 1e-9);
                    assert!((t.length() - 20.0).abs() < 1e-9);
                }
                TangentKind::OuterRight => {
                    assert!((t.start().y - 10.0).abs() < 1e-9, "RSR start {:?}", t.start());
                    assert!((t.end().y - 10.0).abs() < 1e-9);
                    assert!((t.length() - 20.0).abs() < 1e-9);
                }
                _ => {
                    // Inner tangents collapse onto the contact point.
                    assert!(t.length() < 1e-4, "inner length {}", t.length());
                    assert!((t.start().x - 10.0).abs() < 1e-3);
                }
            }
            assert!(t.start().x.is_finite() && t.end().y.is_finite());
        }
    }

    #[test]
    fn overlapping_pair_has_only_outer_tangents() {
        let (aid, a, bid, b) = pair(0.0, 0.0, 2.0, 3.0, 0.0, 2.0);
        let tangents = bitangents(aid, &a, bid, &b);
        assert_eq!(tangents.len(), 2);
        assert!(tangents.iter().all(|t| !t.kind().is_inner()));
    }

    #[test]
    fn nested_pair_yields_sentinels_without_nan() {
        let (aid, a, bid, b) = pair(0.0, 0.0, 5.0, 1.0, 0.0, 1.0);
        let tangents = bitangents(aid, &a, bid, &b);
        assert_eq!(tangents.len(), 4);
        for t in &tangents {
            assert!(t.is_sentinel());
            assert!(t.start().x.is_finite() && t.start().y.is_finite());
            assert!(t.end().x.is_finite() && t.end().y.is_finite());
            assert!((t.length() - 1.0).abs() < 1e-12);
        }
        // One sentinel per kind.
        let kinds: std::collections::HashSet<_> =
            tangents.iter().map(TangentSegment::kind).collect();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn coincident_centers_yield_nothing() {
        let (aid, a, bid, b) = pair(1.0, 1.0, 2.0, 1.0, 1.0, 1.0);
        assert!(bitangents(aid, &a, bid, &b).is_empty());
    }

    #[test]
    fn chirality_letter_convention() {
        assert_eq!(TangentKind::OuterLeft.start_chirality(), Chirality::Ccw);
        assert_eq!(TangentKind::OuterLeft.end_chirality(), Chirality::Ccw);
        assert_eq!(TangentKind::InnerLeftRight.start_chirality(), Chirality::Ccw);
        assert_eq!(TangentKind::InnerLeftRight.end_chirality(), Chirality::Cw);
        assert_eq!(TangentKind::InnerRightLeft.label(), "RSL");
    }

    #[test]
    fn lsl_keeps_start_disk_on_the_left() {
        let (aid, a, bid, b) = pair(0.0, 0.0, 1.0, 4.0, 0.0, 1.0);
        let lsl = bitangents(aid, &a, bid, &b)
            .into_iter()
            .find(|t| t.kind() == TangentKind::OuterLeft)
            .unwrap();
        // Direction of travel; center must lie to the left of it.
        let dir = (lsl.end() - lsl.start()).normalize();
        let to_center = a.center() - lsl.start();
        let cross = dir.x * to_center.y - dir.y * to_center.x;
        assert!(cross > 0.0, "cross={cross}");
    }
}
