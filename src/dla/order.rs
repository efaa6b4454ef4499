//! Orderings that fix the traversal sequence of a guide path.
//!
//! A [`SegmentOrder`] must be a total order: transitive, deterministic, and
//! `Equal` only for segments the path should treat as one and the same. The
//! path drops any new segment that compares `Equal` to a stored one.

use std::cmp::Ordering;

use crate::geom::Point3;

use super::GuideSegment;

pub trait SegmentOrder: Send + Sync {
    fn compare(&self, lhs: &GuideSegment, rhs: &GuideSegment) -> Ordering;

    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> SegmentOrder for F
where
    F: Fn(&GuideSegment, &GuideSegment) -> Ordering + Send + Sync,
{
    fn compare(&self, lhs: &GuideSegment, rhs: &GuideSegment) -> Ordering {
        self(lhs, rhs)
    }
}

/// Lexicographic comparison of start then end coordinates. Keeps segments
/// that share an authoring sequence (standalone ones) strictly ordered.
fn endpoint_order(lhs: &GuideSegment, rhs: &GuideSegment) -> Ordering {
    let (l, r) = (lhs.start(), rhs.start());
    let (le, re) = (lhs.end(), rhs.end());
    l.x.total_cmp(&r.x)
        .then_with(|| l.y.total_cmp(&r.y))
        .then_with(|| l.z.total_cmp(&r.z))
        .then_with(|| le.x.total_cmp(&re.x))
        .then_with(|| le.y.total_cmp(&re.y))
        .then_with(|| le.z.total_cmp(&re.z))
}

/// Default ordering: segments are walked in the order they were authored.
///
/// Segments spanning the same two points are considered equal, so re-adding
/// an existing line is a no-op. Segments with the same sequence number fall
/// back to their endpoint coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOrder;

impl SegmentOrder for PipelineOrder {
    fn compare(&self, lhs: &GuideSegment, rhs: &GuideSegment) -> Ordering {
        if lhs.same_endpoints(rhs) {
            return Ordering::Equal;
        }
        lhs.seq
            .cmp(&rhs.seq)
            .then_with(|| endpoint_order(lhs, rhs))
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

/// Orders segments by the distance of their midpoint from `origin`, nearest
/// first (farthest first when `flipped`). Equal distances fall back to
/// authoring order.
#[derive(Debug, Clone, Copy)]
pub struct RadialDistanceOrder {
    pub origin: Point3,
    pub flipped: bool,
}

impl RadialDistanceOrder {
    #[must_use]
    pub const fn new(origin: Point3, flipped: bool) -> Self {
        Self { origin, flipped }
    }
}

impl Default for RadialDistanceOrder {
    fn default() -> Self {
        Self::new(Point3::ORIGIN, false)
    }
}

impl SegmentOrder for RadialDistanceOrder {
    fn compare(&self, lhs: &GuideSegment, rhs: &GuideSegment) -> Ordering {
        if lhs.same_endpoints(rhs) {
            return Ordering::Equal;
        }

        let dl = lhs.midpoint().distance_squared_to(self.origin);
        let dr = rhs.midpoint().distance_squared_to(self.origin);
        let by_distance = dl.total_cmp(&dr);
        let by_distance = if self.flipped {
            by_distance.reverse()
        } else {
            by_distance
        };

        by_distance
            .then_with(|| lhs.seq.cmp(&rhs.seq))
            .then_with(|| endpoint_order(lhs, rhs))
    }

    fn name(&self) -> &'static str {
        "radial"
    }
}
