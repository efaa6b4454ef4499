//! Geometry primitives consumed by the guide-line core.

mod core;
mod line;

pub use self::core::{Point3, Tolerance, Vec3};
pub use line::Line3;
