use super::{Point3, Vec3};

/// Directed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub start: Point3,
    pub end: Point3,
}

impl Line3 {
    #[must_use]
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Unnormalized vector from `start` to `end`.
    #[must_use]
    pub const fn direction(self) -> Vec3 {
        self.end.sub_point(self.start)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.direction().length()
    }

    #[must_use]
    pub fn point_at(self, t: f64) -> Point3 {
        self.start.lerp(self.end, t)
    }

    #[must_use]
    pub fn midpoint(self) -> Point3 {
        self.point_at(0.5)
    }
}
