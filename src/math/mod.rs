pub mod angle;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Slack for tangency, containment and support-line classification.
///
/// A disk whose center is within `GEOM_EPS` of the boundary condition is
/// treated as touching rather than crossing.
pub const GEOM_EPS: f64 = 1e-4;

/// Margin trimming both ends of a segment's parameter interval in
/// blocking tests, so contact at a tangent point does not count as a
/// crossing.
pub const BLOCK_MARGIN: f64 = 1e-3;

/// Quantization step for position keys when chaining exposed arcs
/// end-to-start across floating-point error.
pub const CHAIN_QUANTUM: f64 = 1e-3;
