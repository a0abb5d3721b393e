//! Bounded-curvature envelopes and robust hulls over 2D disk
//! configurations.
//!
//! Given a set of disks, the crate builds a contact graph of all
//! collision-free bitangents between disk pairs, finds minimum-length
//! envelope paths (tangent segments plus boundary arcs, with a
//! continuously propagating turning sense per disk) through a visiting
//! sequence, and computes outer boundaries: a gift-wrapping convex hull
//! of disks with support validation and a polygon fallback, or the union
//! boundary of overlapping disks from their exposed arcs.
//!
//! ```
//! use gyre::{ContactGraph, Disk, DiskSet, EnvelopePathFinder};
//! use gyre::math::Point2;
//!
//! # fn main() -> gyre::Result<()> {
//! let mut set = DiskSet::new();
//! let a = set.insert(Disk::new(Point2::new(0.0, 0.0), 1.0)?);
//! let b = set.insert(Disk::new(Point2::new(8.0, 3.0), 2.0)?);
//!
//! let graph = ContactGraph::build(&set, true, &[]);
//! let path = EnvelopePathFinder::new(&graph).find_path(&[a, b], None);
//! assert!(!path.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod operations;

pub use error::{GyreError, Result};
pub use geometry::disk::{Disk, DiskId, DiskSet};
pub use geometry::envelope::{ArcSegment, Chirality, EnvelopePath, EnvelopeSegment};
pub use geometry::tangent::{bitangents, TangentKind, TangentSegment};
pub use graph::{ContactGraph, Obstacle};
pub use operations::{
    ContourStrategy, EnvelopePathFinder, HullFailure, HullResult, OuterContour, RobustDiskHull,
};
