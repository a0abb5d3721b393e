pub mod disk;
pub mod envelope;
pub mod tangent;

pub use disk::{Disk, DiskId, DiskSet};
pub use envelope::{ArcSegment, Chirality, EnvelopePath, EnvelopeSegment};
pub use tangent::{bitangents, TangentKind, TangentSegment};
