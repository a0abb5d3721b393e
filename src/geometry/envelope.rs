use crate::math::{angle::directed_sweep, Point2};

use super::disk::{Disk, DiskId};
use super::tangent::TangentSegment;

/// Turning sense along a disk boundary.
///
/// A path arriving at a disk on a tangent labeled `L` must continue CCW
/// along that disk's boundary until its departing tangent; `R` the same
/// clockwise. Chirality propagates continuously between consecutive
/// segments, which is what keeps the traced curvature bounded by the
/// disk radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chirality {
    /// Counter-clockwise (left turn), label `L`.
    Ccw,
    /// Clockwise (right turn), label `R`.
    Cw,
}

impl Chirality {
    /// Whether this is the counter-clockwise sense.
    #[must_use]
    pub fn is_ccw(self) -> bool {
        self == Self::Ccw
    }

    /// The opposite turning sense.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Ccw => Self::Cw,
            Self::Cw => Self::Ccw,
        }
    }

    /// Single-letter label, `L` or `R`.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            Self::Ccw => 'L',
            Self::Cw => 'R',
        }
    }
}

/// A circular arc along a disk boundary, swept in the direction its
/// chirality dictates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    disk: DiskId,
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    chirality: Chirality,
    sweep: f64,
}

impl ArcSegment {
    /// Creates an arc on `disk` from `start_angle` to `end_angle`.
    ///
    /// The swept angle is resolved by the chirality convention: a naive
    /// delta pointing the wrong way gets a full turn added, so equal
    /// start and end angles describe a full circle, never an empty arc.
    #[must_use]
    pub fn new(
        id: DiskId,
        disk: &Disk,
        start_angle: f64,
        end_angle: f64,
        chirality: Chirality,
    ) -> Self {
        let sweep = directed_sweep(start_angle, end_angle, chirality.is_ccw());
        Self {
            disk: id,
            center: *disk.center(),
            radius: disk.radius(),
            start_angle,
            end_angle,
            chirality,
            sweep,
        }
    }

    /// The disk this arc lies on.
    #[must_use]
    pub fn disk(&self) -> DiskId {
        self.disk
    }

    /// Arc center (the disk center).
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Arc radius (the disk radius).
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Polar angle of the arc start on the disk.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Polar angle of the arc end on the disk.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Turning sense of the arc.
    #[must_use]
    pub fn chirality(&self) -> Chirality {
        self.chirality
    }

    /// Signed swept angle (positive CCW, negative CW).
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Arc length, always non-negative.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.sweep.abs() * self.radius
    }

    /// Evaluates the arc point at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let angle = self.start_angle + self.sweep * t;
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Unit tangent direction at parameter `t`, pointing with travel.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> (f64, f64) {
        let angle = self.start_angle + self.sweep * t;
        let sign = if self.sweep >= 0.0 { 1.0 } else { -1.0 };
        (-sign * angle.sin(), sign * angle.cos())
    }

    /// Start point of the arc.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at(0.0)
    }

    /// End point of the arc.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at(1.0)
    }
}

/// Output alphabet of the path finder and the hull/contour engines.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeSegment {
    /// A straight bitangent segment between two disk boundaries.
    Tangent(TangentSegment),
    /// A boundary arc on a single disk.
    Arc(ArcSegment),
}

impl EnvelopeSegment {
    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Tangent(t) => t.length(),
            Self::Arc(a) => a.length(),
        }
    }

    /// Start point of the segment.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        match self {
            Self::Tangent(t) => *t.start(),
            Self::Arc(a) => a.start_point(),
        }
    }

    /// End point of the segment.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        match self {
            Self::Tangent(t) => *t.end(),
            Self::Arc(a) => a.end_point(),
        }
    }
}

/// Result of an envelope path query.
///
/// An empty path (no segments, no chiralities) means the requested
/// topology has no solution; no error is raised for that case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopePath {
    /// Tangents and arcs in travel order.
    pub segments: Vec<EnvelopeSegment>,
    /// Chosen chirality per visited disk, parallel to the visit sequence.
    pub chiralities: Vec<Chirality>,
    /// Sum of all segment lengths.
    pub total_length: f64,
}

impl EnvelopePath {
    /// An empty (no-solution) path.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this path carries no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::disk::DiskSet;

    fn unit_disk(set: &mut DiskSet) -> (DiskId, Disk) {
        let d = Disk::new(Point2::new(0.0, 0.0), 1.0).unwrap();
        (set.insert(d), d)
    }

    #[test]
    fn ccw_quarter_arc() {
        let mut set = DiskSet::new();
        let (id, d) = unit_disk(&mut set);
        let arc = ArcSegment::new(id, &d, 0.0, PI / 2.0, Chirality::Ccw);
        assert_relative_eq!(arc.sweep(), PI / 2.0, max_relative = 1e-12);
        assert_relative_eq!(arc.length(), PI / 2.0, max_relative = 1e-12);
        let p = arc.start_point();
        assert!((p.x - 1.0).abs() < 1e-12 && p.y.abs() < 1e-12);
        let q = arc.end_point();
        assert!(q.x.abs() < 1e-12 && (q.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cw_arc_takes_other_way_around() {
        let mut set = DiskSet::new();
        let (id, d) = unit_disk(&mut set);
        let arc = ArcSegment::new(id, &d, 0.0, PI / 2.0, Chirality::Cw);
        assert!((arc.sweep() + 1.5 * PI).abs() < 1e-12, "sweep={}", arc.sweep());
        assert!((arc.length() - 1.5 * PI).abs() < 1e-12);
        // Midpoint goes through the bottom of the disk.
        let m = arc.point_at(0.5);
        assert!(m.y < 0.0, "m={m:?}");
    }

    #[test]
    fn equal_angles_are_a_full_circle() {
        let mut set = DiskSet::new();
        let (id, d) = unit_disk(&mut set);
        let arc = ArcSegment::new(id, &d, PI, PI, Chirality::Ccw);
        assert!((arc.length() - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn arc_length_never_negative() {
        let mut set = DiskSet::new();
        let (id, d) = unit_disk(&mut set);
        for &(a, b) in &[(0.0, 1.0), (1.0, 0.0), (-3.0, 3.0), (2.0, 2.0)] {
            for &c in &[Chirality::Ccw, Chirality::Cw] {
                let arc = ArcSegment::new(id, &d, a, b, c);
                assert!(arc.length() >= 0.0);
                assert!(arc.length() <= 2.0 * PI + 1e-12);
            }
        }
    }

    #[test]
    fn tangent_at_matches_chirality() {
        let mut set = DiskSet::new();
        let (id, d) = unit_disk(&mut set);
        let ccw = ArcSegment::new(id, &d, 0.0, PI, Chirality::Ccw);
        let (tx, ty) = ccw.tangent_at(0.0);
        // CCW at angle 0 travels in +y.
        assert!(tx.abs() < 1e-12 && (ty - 1.0).abs() < 1e-12);

        let cw = ArcSegment::new(id, &d, PI, 0.0, Chirality::Cw);
        let (tx, ty) = cw.tangent_at(0.0);
        // CW at angle π travels in +y as well.
        assert!(tx.abs() < 1e-12 && (ty - 1.0).abs() < 1e-12);
    }

    #[test]
    fn chirality_labels() {
        assert_eq!(Chirality::Ccw.label(), 'L');
        assert_eq!(Chirality::Cw.label(), 'R');
        assert_eq!(Chirality::Ccw.opposite(), Chirality::Cw);
    }
}
