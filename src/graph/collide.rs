//! Collision filtering for candidate tangent edges.
//!
//! A candidate is rejected when it strictly crosses any disk other than
//! the two it touches, or any external obstacle segment. Boundary
//! grazing and endpoint contact never block: the parameter window of the
//! segment is trimmed by [`BLOCK_MARGIN`] at both ends and the tested
//! radius is shrunk by [`GEOM_EPS`], so a tangent that merely kisses a
//! third disk survives.

use crate::geometry::disk::{Disk, DiskId, DiskSet};
use crate::geometry::tangent::TangentSegment;
use crate::math::intersect_2d::{segment_circle_chord_2d, segments_cross_2d};
use crate::math::{Point2, BLOCK_MARGIN, GEOM_EPS};

/// An obstacle segment the engine must route around.
pub type Obstacle = (Point2, Point2);

/// Tests whether the open interior of `a0`-`a1` passes through a disk.
///
/// Uses the chord interval of the supporting line: the segment is
/// blocked when the chord overlaps the open window
/// `(BLOCK_MARGIN, 1 - BLOCK_MARGIN)`. This also catches a segment
/// swallowed whole by a large disk, where neither quadratic root lands
/// inside `[0, 1]`.
#[must_use]
pub fn segment_blocked_by_disk(a0: &Point2, a1: &Point2, disk: &Disk) -> bool {
    let radius = disk.radius() - GEOM_EPS;
    if radius <= 0.0 {
        return false;
    }
    match segment_circle_chord_2d(a0, a1, disk.center(), radius) {
        Some((t_enter, t_exit)) => t_exit > BLOCK_MARGIN && t_enter < 1.0 - BLOCK_MARGIN,
        None => false,
    }
}

/// Tests whether a candidate tangent edge is blocked by any third disk
/// or obstacle segment.
///
/// The two disks owning the tangent are ignored, as are any IDs in
/// `ignore`. Sentinel edges are never blocked: they exist precisely to
/// preserve connectivity when no valid geometry remains.
#[must_use]
pub fn tangent_blocked(
    segment: &TangentSegment,
    set: &DiskSet,
    obstacles: &[Obstacle],
    ignore: &[DiskId],
) -> bool {
    if segment.is_sentinel() {
        return false;
    }

    for (id, disk) in set.iter() {
        if id == segment.start_disk() || id == segment.end_disk() || ignore.contains(&id) {
            continue;
        }
        if segment_blocked_by_disk(segment.start(), segment.end(), disk) {
            return true;
        }
    }

    for (o0, o1) in obstacles {
        if segments_cross_2d(segment.start(), segment.end(), o0, o1) {
            return true;
        }
    }

    false
}
