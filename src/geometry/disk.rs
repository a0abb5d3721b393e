use slotmap::SlotMap;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, GEOM_EPS, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for a disk in a [`DiskSet`].
    pub struct DiskId;
}

/// A disk in the plane: center, positive radius, optional group tag.
///
/// Disks are immutable values. Identity lives in the [`DiskSet`] arena
/// key, not in the disk itself; moving a disk means inserting a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    center: Point2,
    radius: f64,
    group: Option<u32>,
}

impl Disk {
    /// Creates a new disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("disk radius must be positive".into()).into());
        }
        Ok(Self {
            center,
            radius,
            group: None,
        })
    }

    /// Creates a new disk carrying a group/region tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn with_group(center: Point2, radius: f64, group: u32) -> Result<Self> {
        let mut disk = Self::new(center, radius)?;
        disk.group = Some(group);
        Ok(disk)
    }

    /// Returns the center of the disk.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the disk.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the group tag, if any.
    #[must_use]
    pub fn group(&self) -> Option<u32> {
        self.group
    }

    /// Returns the boundary point at polar angle `angle`.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Returns the polar angle of a point relative to the disk center.
    #[must_use]
    pub fn angle_of(&self, p: &Point2) -> f64 {
        (p.y - self.center.y).atan2(p.x - self.center.x)
    }

    /// Tests whether a point lies strictly inside the disk.
    ///
    /// Points within `GEOM_EPS` of the boundary count as on it, not in it.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let r = self.radius - GEOM_EPS;
        dx * dx + dy * dy < r * r
    }

    /// Tests whether `other` lies entirely inside this disk.
    #[must_use]
    pub fn contains_disk(&self, other: &Disk) -> bool {
        let d = (other.center - self.center).norm();
        d + other.radius <= self.radius + GEOM_EPS
    }

    /// Tests whether the interiors of the two disks intersect.
    #[must_use]
    pub fn overlaps(&self, other: &Disk) -> bool {
        let d = (other.center - self.center).norm();
        d < self.radius + other.radius - GEOM_EPS
    }
}

/// Arena owning a configuration of disks.
///
/// Disks reference each other only via [`DiskId`] generational keys, so
/// every derived artifact (graph edges, paths, hulls) stays valid-by-id
/// for the lifetime of the set.
#[derive(Debug, Default, Clone)]
pub struct DiskSet {
    disks: SlotMap<DiskId, Disk>,
}

impl DiskSet {
    /// Creates a new, empty disk set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a disk and returns its ID.
    pub fn insert(&mut self, disk: Disk) -> DiskId {
        self.disks.insert(disk)
    }

    /// Removes a disk. Derived artifacts referencing it become stale.
    pub fn remove(&mut self, id: DiskId) -> Option<Disk> {
        self.disks.remove(id)
    }

    /// Returns the disk for an ID, if present.
    #[must_use]
    pub fn get(&self, id: DiskId) -> Option<&Disk> {
        self.disks.get(id)
    }

    /// Number of disks in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Iterates over `(id, disk)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DiskId, &Disk)> {
        self.disks.iter()
    }

    /// Whether any pair of disks in the set has intersecting interiors.
    #[must_use]
    pub fn any_overlap(&self) -> bool {
        let disks: Vec<&Disk> = self.disks.values().collect();
        for (i, a) in disks.iter().enumerate() {
            for b in &disks[i + 1..] {
                if a.overlaps(b) {
                    return true;
                }
            }
        }
        false
    }
}
