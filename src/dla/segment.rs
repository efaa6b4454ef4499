use crate::geom::{Line3, Point3, Tolerance, Vec3};

use super::GuideError;

/// Directed guide segment from `a` to `b`.
///
/// The optional `next` anchor is the point the guide continues towards after
/// `b`. It only feeds [`GuideSegment::next_direction`], which lets a path blend
/// smoothly across polyline joints. Direction, length and exit direction are
/// computed once at construction; segments never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideSegment {
    a: Point3,
    b: Point3,
    next: Option<Point3>,
    direction: Vec3,
    next_direction: Vec3,
    length: f64,
    pub(crate) seq: u64,
}

impl GuideSegment {
    /// Segment without a successor anchor; it continues straight past `b`.
    pub fn new(a: Point3, b: Point3) -> Result<Self, GuideError> {
        Self::build(a, b, None)
    }

    /// Segment whose exit direction points from `b` towards `next`.
    pub fn with_next(a: Point3, b: Point3, next: Point3) -> Result<Self, GuideError> {
        Self::build(a, b, Some(next))
    }

    /// Splits a polyline into one segment per consecutive point pair.
    ///
    /// Every segment except the last gets the following polyline vertex as
    /// its successor anchor.
    pub fn from_polyline(points: &[Point3]) -> Result<Vec<Self>, GuideError> {
        if points.len() < 2 {
            return Err(GuideError::NotEnoughPoints {
                min: 2,
                got: points.len(),
            });
        }

        (1..points.len())
            .map(|i| Self::build(points[i - 1], points[i], points.get(i + 1).copied()))
            .collect()
    }

    fn build(a: Point3, b: Point3, next: Option<Point3>) -> Result<Self, GuideError> {
        if !a.is_finite() || !b.is_finite() || next.is_some_and(|p| !p.is_finite()) {
            return Err(GuideError::NonFinitePoint);
        }

        let delta = b - a;
        let length = delta.length();
        if Tolerance::ZERO_LENGTH.is_zero_length(length) {
            return Err(GuideError::DegenerateSegment);
        }
        let direction = delta.normalized().ok_or(GuideError::DegenerateSegment)?;

        // A successor anchor sitting on `b` gives no turn information.
        let next_direction = next
            .and_then(|p| (p - b).normalized())
            .unwrap_or(direction);

        Ok(Self {
            a,
            b,
            next,
            direction,
            next_direction,
            length,
            seq: 0,
        })
    }

    #[must_use]
    pub fn start(&self) -> Point3 {
        self.a
    }

    #[must_use]
    pub fn end(&self) -> Point3 {
        self.b
    }

    #[must_use]
    pub fn next(&self) -> Option<Point3> {
        self.next
    }

    /// Unit vector from start to end.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Unit vector from end towards the successor anchor, or
    /// [`direction`](Self::direction) when there is none.
    #[must_use]
    pub fn next_direction(&self) -> Vec3 {
        self.next_direction
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        self.a.lerp(self.b, 0.5)
    }

    /// Authoring sequence assigned by the owning path.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn as_line(&self) -> Line3 {
        Line3::new(self.a, self.b)
    }

    /// True when both segments run between the same two points.
    #[must_use]
    pub fn same_endpoints(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl From<&GuideSegment> for Line3 {
    fn from(segment: &GuideSegment) -> Self {
        segment.as_line()
    }
}

impl TryFrom<Line3> for GuideSegment {
    type Error = GuideError;

    fn try_from(line: Line3) -> Result<Self, Self::Error> {
        Self::new(line.start, line.end)
    }
}
