// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{reflect, refract};
pub use ray::Ray;

/// Threshold for parallel-ray rejection and self-intersection avoidance.
///
/// Intersections closer than this to the ray origin are discarded, which keeps
/// secondary rays spawned on a surface from hitting that same surface again.
pub const EPSILON: f32 = 1e-4;
