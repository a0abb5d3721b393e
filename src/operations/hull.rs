//! Robust convex hull of a disk set (gift wrapping with support
//! validation).
//!
//! # Algorithm
//!
//! 1. Disks fully contained in another disk are dropped; they cannot
//!    touch the hull.
//! 2. The walk starts on the disk with the smallest `center.x - radius`
//!    (the leftmost boundary point), with the boundary normal pointing
//!    away from the hull at angle π.
//! 3. Each step computes the CCW outer tangent from the current disk to
//!    every other disk, keeps only *support lines* (every disk center
//!    projects onto the interior side by at least its radius), and picks
//!    the candidate with the smallest non-negative turn from the current
//!    normal, breaking near-ties by the farthest target disk.
//! 4. An arc from the current normal to the departure normal and then
//!    the tangent itself are emitted; the walk advances and terminates
//!    when it returns to the start disk.
//!
//! Any failure (no valid candidate, a revisited edge, the iteration cap,
//! a NaN) is reported as a reason code together with a convex hull of
//! the disk centers as an always-available fallback polygon.

use std::collections::HashSet;

use thiserror::Error;

use crate::geometry::disk::{Disk, DiskId, DiskSet};
use crate::geometry::envelope::{ArcSegment, Chirality, EnvelopeSegment};
use crate::geometry::tangent::{bitangents, TangentKind, TangentSegment};
use crate::math::angle::ccw_turn;
use crate::math::polygon_2d::{convex_hull_2d, rotate_to_canonical_start};
use crate::math::{Point2, GEOM_EPS, TOLERANCE};

/// Why a hull walk could not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HullFailure {
    /// No support-valid tangent leaves the current disk (degenerate or
    /// collinear configuration).
    #[error("no valid support tangent from the current disk")]
    NoNextLink,
    /// The walk revisited a tangent edge.
    #[error("hull walk revisited an edge")]
    LoopDetected,
    /// The 4x-disk-count iteration cap was reached.
    #[error("hull walk exceeded the iteration bound")]
    MaxIters,
    /// A non-finite coordinate or angle appeared.
    #[error("hull walk produced a non-finite value")]
    NumericalNan,
}

/// Outcome of [`RobustDiskHull::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum HullResult {
    /// A simple closed curve of tangents and CCW arcs.
    Closed(Vec<EnvelopeSegment>),
    /// The walk failed; `fallback` is the convex hull of the disk
    /// centers, a lower-fidelity but always-renderable polygon.
    Degenerate {
        reason: HullFailure,
        fallback: Vec<Point2>,
    },
}

impl HullResult {
    /// Whether the hull closed successfully.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }
}

/// Gift-wrapping hull operation over a disk set.
#[derive(Debug)]
pub struct RobustDiskHull<'a> {
    set: &'a DiskSet,
}

struct Candidate {
    target: DiskId,
    tangent: TangentSegment,
    turn: f64,
    dist: f64,
}

impl<'a> RobustDiskHull<'a> {
    /// Creates the hull operation for a disk set.
    #[must_use]
    pub fn new(set: &'a DiskSet) -> Self {
        Self { set }
    }

    /// Runs the gift-wrapping walk.
    #[must_use]
    pub fn execute(&self) -> HullResult {
        let disks = self.hull_candidates();
        if disks.is_empty() {
            return self.fail(HullFailure::NoNextLink);
        }
        if disks.len() == 1 {
            let (id, disk) = disks[0];
            let arc = ArcSegment::new(id, &disk, std::f64::consts::PI, std::f64::consts::PI, Chirality::Ccw);
            return HullResult::Closed(vec![EnvelopeSegment::Arc(arc)]);
        }

        let Some(&(start_id, start_disk)) = disks.iter().min_by(|(_, a), (_, b)| {
            (a.center().x - a.radius()).total_cmp(&(b.center().x - b.radius()))
        }) else {
            return self.fail(HullFailure::NoNextLink);
        };

        let mut segments: Vec<EnvelopeSegment> = Vec::new();
        let mut visited: HashSet<(DiskId, DiskId)> = HashSet::new();
        let mut current = (start_id, start_disk);
        let mut normal = std::f64::consts::PI;
        let mut first_departure: Option<f64> = None;
        let max_iters = 4 * disks.len();

        for _ in 0..max_iters {
            let Some(chosen) = self.next_link(current, normal, &disks) else {
                tracing::debug!(disk = ?current.0, "no support-valid tangent candidate");
                return self.fail(HullFailure::NoNextLink);
            };

            let departure = chosen.tangent.start_angle();
            if !departure.is_finite() || !chosen.tangent.length().is_finite() {
                return self.fail(HullFailure::NumericalNan);
            }
            if !visited.insert((current.0, chosen.target)) {
                tracing::debug!(from = ?current.0, to = ?chosen.target, "edge revisited");
                return self.fail(HullFailure::LoopDetected);
            }

            // The starting normal only seeds candidate selection; the
            // start disk's boundary arc is emitted once, as the closing
            // arc, so it is not split in two.
            if first_departure.is_none() {
                first_departure = Some(departure);
            } else if chosen.turn > TOLERANCE {
                segments.push(EnvelopeSegment::Arc(ArcSegment::new(
                    current.0,
                    &current.1,
                    normal,
                    departure,
                    Chirality::Ccw,
                )));
            }
            normal = chosen.tangent.end_angle();
            segments.push(EnvelopeSegment::Tangent(chosen.tangent));

            let Some(next_disk) = self.set.get(chosen.target) else {
                return self.fail(HullFailure::NumericalNan);
            };
            current = (chosen.target, *next_disk);

            if current.0 == start_id {
                let home = first_departure.unwrap_or(std::f64::consts::PI);
                if ccw_turn(normal, home) > TOLERANCE {
                    segments.push(EnvelopeSegment::Arc(ArcSegment::new(
                        start_id,
                        &start_disk,
                        normal,
                        home,
                        Chirality::Ccw,
                    )));
                }
                return HullResult::Closed(segments);
            }
        }

        tracing::debug!(iters = max_iters, "hull walk exceeded iteration bound");
        self.fail(HullFailure::MaxIters)
    }

    /// Disks that can appear on the hull: everything not fully contained
    /// in another disk. Identical duplicates keep only their first
    /// occurrence.
    fn hull_candidates(&self) -> Vec<(DiskId, Disk)> {
        let all: Vec<(DiskId, Disk)> = self.set.iter().map(|(id, d)| (id, *d)).collect();
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

    /// Best support-valid CCW outer tangent leaving the current disk.
    fn next_link(
        &self,
        current: (DiskId, Disk),
        normal: f64,
        disks: &[(DiskId, Disk)],
    ) -> Option<Candidate> {
        let (current_id, current_disk) = current;
        let mut best: Option<Candidate> = None;

        for &(id, disk) in disks {
            if id == current_id {
                continue;
            }
            let Some(tangent) = bitangents(current_id, &current_disk, id, &disk)
                .into_iter()
                .find(|t| t.kind() == TangentKind::OuterLeft && !t.is_sentinel())
            else {
                continue;
            };

            if !is_support_line(&tangent, disks) {
                continue;
            }

            let turn = ccw_turn(normal, tangent.start_angle());
            let dist = (disk.center() - current_disk.center()).norm();
            let replace = match &best {
                None => true,
                Some(champion) => {
                    turn < champion.turn - GEOM_EPS
                        || (turn < champion.turn + GEOM_EPS && dist > champion.dist)
                }
            };
            if replace {
                best = Some(Candidate {
                    target: id,
                    tangent,
                    turn,
                    dist,
                });
            }
        }

        best
    }

    fn fail(&self, reason: HullFailure) -> HullResult {
        let centers: Vec<Point2> = self.set.iter().map(|(_, d)| *d.center()).collect();
        let fallback = rotate_to_canonical_start(&convex_hull_2d(&centers));
        HullResult::Degenerate { reason, fallback }
    }
}

/// A tangent is a support line when every disk lies entirely on its
/// interior (left) side.
fn is_support_line(tangent: &TangentSegment, disks: &[(DiskId, Disk)]) -> bool {
    let dir = tangent.end() - tangent.start();
    let len = dir.norm();
    if len < TOLERANCE {
        // Zero-length tangent (touching disks): orient by the departure
        // normal instead.
        return is_support_by_normal(tangent.start(), tangent.start_angle(), disks);
    }
    let dir = dir / len;
    // Interior is to the left of travel for a CCW hull.
    let left = crate::math::Vector2::new(-dir.y, dir.x);
    for (_, disk) in disks {
        let signed = (disk.center() - tangent.start()).dot(&left);
        if signed < disk.radius() - GEOM_EPS {
            return false;
        }
    }
    true
}

fn is_support_by_normal(at: &Point2, normal: f64, disks: &[(DiskId, Disk)]) -> bool {
    // Outward normal angle; the interior direction is its negation.
    let inward = crate::math::Vector2::new(-normal.cos(), -normal.sin());
    for (_, disk) in disks {
        let signed = (disk.center() - at).dot(&inward);
        if signed < disk.radius() - GEOM_EPS {
            return false;
        }
    }
    true
}
