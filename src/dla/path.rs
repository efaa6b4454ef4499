use std::cmp::Ordering;
use std::fmt;

use crate::geom::{Line3, Point3, Vec3};

use super::{
    GuideDiagnostics, GuideError, GuideEvent, GuideObserver, GuideSegment, LogObserver,
    PipelineOrder, SegmentOrder,
};

/// Upper bound on the number of positions [`GuidePath::sample`] returns.
pub const MAX_SAMPLE_POINTS: usize = 1 << 22;

/// Where a path is in its traversal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    /// No cursor yet, or the segment set changed since the last reset.
    Uninitialized,
    Traversing { index: usize },
    Complete,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    t: f64,
    anchor: Point3,
    direction: Option<Vec3>,
}

/// Ordered set of guide segments plus a restartable traversal cursor.
///
/// Segments are authored with the `add_*` methods, then a driver calls
/// [`reset`](Self::reset) and alternates [`advance`](Self::advance) with
/// position and direction queries until [`is_complete`](Self::is_complete).
///
/// Progress `t` is normalized per segment. When an advance pushes `t` past
/// 1.0 the overflow carries into the next segment, but at most one segment
/// boundary is crossed per call. Positions are measured from the current
/// segment's start using that segment's length, along a direction blended
/// linearly between the segment direction and its exit direction.
///
/// Adding segments after `reset` drops the cursor; call `reset` again before
/// querying.
pub struct GuidePath {
    segments: Vec<GuideSegment>,
    order: Box<dyn SegmentOrder>,
    observer: Box<dyn GuideObserver>,
    cursor: Option<Cursor>,
    next_seq: u64,
    completion_reported: bool,
    diagnostics: GuideDiagnostics,
}

impl GuidePath {
    /// Empty path walked in authoring order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(PipelineOrder)
    }

    #[must_use]
    pub fn with_order(order: impl SegmentOrder + 'static) -> Self {
        Self {
            segments: Vec::new(),
            order: Box::new(order),
            observer: Box::new(LogObserver),
            cursor: None,
            next_seq: 0,
            completion_reported: false,
            diagnostics: GuideDiagnostics::default(),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl GuideObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    // ── authoring ───────────────────────────────────────────────────────────

    /// Adds an independent segment from `a` to `b`.
    pub fn add_line(&mut self, a: Point3, b: Point3) -> Result<&mut Self, GuideError> {
        let segment = GuideSegment::new(a, b)?;
        self.insert(segment);
        Ok(self)
    }

    pub fn add_line3(&mut self, line: Line3) -> Result<&mut Self, GuideError> {
        self.add_line(line.start, line.end)
    }

    /// Adds several independent segments. Nothing is inserted if any pair is
    /// invalid.
    pub fn add_lines<I>(&mut self, lines: I) -> Result<&mut Self, GuideError>
    where
        I: IntoIterator<Item = (Point3, Point3)>,
    {
        let segments = lines
            .into_iter()
            .map(|(a, b)| GuideSegment::new(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        for segment in segments {
            self.insert(segment);
        }
        Ok(self)
    }

    /// Adds one segment per consecutive point pair, each aware of the vertex
    /// that follows it.
    pub fn add_polyline(&mut self, points: &[Point3]) -> Result<&mut Self, GuideError> {
        for segment in GuideSegment::from_polyline(points)? {
            self.insert(segment);
        }
        Ok(self)
    }

    fn insert(&mut self, mut segment: GuideSegment) {
        segment.seq = self.next_seq;
        self.next_seq += 1;

        if self
            .segments
            .iter()
            .any(|existing| self.order.compare(existing, &segment) == Ordering::Equal)
        {
            self.diagnostics.duplicates_dropped += 1;
            self.observer
                .on_event(GuideEvent::DuplicateDropped { segment: &segment });
            return;
        }

        let index = self
            .segments
            .partition_point(|existing| self.order.compare(existing, &segment) == Ordering::Less);
        self.segments.insert(index, segment);
        self.diagnostics.segment_count = self.segments.len();
        self.observer.on_event(GuideEvent::SegmentAdded {
            segment: &self.segments[index],
            index,
        });

        if self.cursor.take().is_some() {
            log::debug!("guide path modified during traversal, cursor cleared");
        }
    }

    // ── traversal ───────────────────────────────────────────────────────────

    /// Places the cursor at the start of the first segment in order.
    pub fn reset(&mut self) -> Result<&mut Self, GuideError> {
        let first = self.segments.first().ok_or(GuideError::EmptyPath)?;
        self.cursor = Some(Cursor {
            index: 0,
            t: 0.0,
            anchor: first.start(),
            direction: None,
        });
        self.completion_reported = false;
        self.diagnostics.resets += 1;
        self.diagnostics.segments_entered += 1;
        self.observer.on_event(GuideEvent::SegmentEntered {
            segment: first,
            index: 0,
        });
        Ok(self)
    }

    /// Moves the cursor forward by `delta` (in segment-normalized units) and
    /// returns the segment it now sits on.
    pub fn advance(&mut self, delta: f64) -> Result<&GuideSegment, GuideError> {
        if !delta.is_finite() {
            return Err(GuideError::NonFiniteAdvance);
        }
        if delta < 0.0 {
            return Err(GuideError::NegativeAdvance { delta });
        }
        let cursor = self.cursor.as_mut().ok_or(GuideError::UninitializedPath)?;

        self.diagnostics.advance_calls += 1;
        cursor.t += delta;

        if cursor.t >= 1.0 {
            let next_index = cursor.index + 1;
            if let Some(next) = self.segments.get(next_index) {
                cursor.t -= 1.0;
                cursor.index = next_index;
                cursor.anchor = next.start();
                cursor.direction = None;
                self.diagnostics.segments_entered += 1;
                if cursor.t >= 1.0 {
                    self.diagnostics.truncated_advances += 1;
                }
                self.observer.on_event(GuideEvent::SegmentEntered {
                    segment: next,
                    index: next_index,
                });
            } else if !self.completion_reported {
                self.completion_reported = true;
                self.observer.on_event(GuideEvent::Completed {
                    segment_count: self.segments.len(),
                });
            }
        }

        Ok(&self.segments[cursor.index])
    }

    /// True once the last segment has been fully consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor
            .is_some_and(|c| c.index + 1 >= self.segments.len() && c.t >= 1.0)
    }

    #[must_use]
    pub fn state(&self) -> TraversalState {
        match self.cursor {
            None => TraversalState::Uninitialized,
            Some(_) if self.is_complete() => TraversalState::Complete,
            Some(c) => TraversalState::Traversing { index: c.index },
        }
    }

    /// Interpolated position at the cursor. Also refreshes the direction
    /// returned by [`current_direction`](Self::current_direction).
    pub fn current_position(&mut self) -> Result<Point3, GuideError> {
        let cursor = self.cursor.as_mut().ok_or(GuideError::UninitializedPath)?;
        let segment = &self.segments[cursor.index];

        // Opposite directions blend to zero at the midpoint; hold the segment
        // direction there.
        let direction = segment
            .direction()
            .lerp(segment.next_direction(), cursor.t)
            .normalized()
            .unwrap_or(segment.direction());
        cursor.direction = Some(direction);

        Ok(cursor.anchor + direction * (segment.length() * cursor.t))
    }

    /// Direction computed by the last [`current_position`](Self::current_position)
    /// call on this segment. Computed on demand after `reset` or a segment
    /// change.
    pub fn current_direction(&mut self) -> Result<Vec3, GuideError> {
        let cached = self
            .cursor
            .as_ref()
            .ok_or(GuideError::UninitializedPath)?
            .direction;
        if let Some(direction) = cached {
            return Ok(direction);
        }

        self.current_position()?;
        self.cursor
            .and_then(|c| c.direction)
            .ok_or(GuideError::UninitializedPath)
    }

    /// Normalized progress within the current segment. May exceed 1.0 once
    /// the path is complete.
    pub fn current_segment_progress(&self) -> Result<f64, GuideError> {
        self.cursor
            .map(|c| c.t)
            .ok_or(GuideError::UninitializedPath)
    }

    pub fn current_segment(&self) -> Result<&GuideSegment, GuideError> {
        let cursor = self.cursor.as_ref().ok_or(GuideError::UninitializedPath)?;
        Ok(&self.segments[cursor.index])
    }

    /// Resets and walks the whole path in steps of `delta`, returning every
    /// visited position including the start.
    ///
    /// Steps so small that the walk would exceed [`MAX_SAMPLE_POINTS`] are
    /// rejected up front.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&mut self, delta: f64) -> Result<Vec<Point3>, GuideError> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(GuideError::InvalidStep { delta });
        }
        let too_many = GuideError::TooManySamples {
            delta,
            limit: MAX_SAMPLE_POINTS,
        };
        if (self.len() as f64 / delta).ceil() + 1.0 > MAX_SAMPLE_POINTS as f64 {
            return Err(too_many);
        }

        self.reset()?;
        let mut points = vec![self.current_position()?];
        while !self.is_complete() {
            if points.len() >= MAX_SAMPLE_POINTS {
                return Err(too_many);
            }
            self.advance(delta)?;
            points.push(self.current_position()?);
        }
        Ok(points)
    }

    // ── inspection ──────────────────────────────────────────────────────────

    /// Segments in traversal order.
    #[must_use]
    pub fn segments(&self) -> &[GuideSegment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn order_name(&self) -> &'static str {
        self.order.name()
    }

    #[must_use]
    pub fn diagnostics(&self) -> GuideDiagnostics {
        self.diagnostics.clone()
    }
}

impl Default for GuidePath {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GuidePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuidePath")
            .field("order", &self.order.name())
            .field("segments", &self.segments)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
