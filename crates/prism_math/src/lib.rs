// Re-export glam for convenience
pub use glam::*;

// prism math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::{Ray, RAY_EPSILON};
pub use vector::Vec3Ext;
