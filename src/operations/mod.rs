pub mod contour;
pub mod hull;
pub mod path;

pub use contour::{ContourStrategy, OuterContour};
pub use hull::{HullFailure, HullResult, RobustDiskHull};
pub use path::EnvelopePathFinder;
