//! Observability hook for guide path events.
//!
//! The path never talks to the logger itself; it reports [`GuideEvent`]s to
//! its observer. [`LogObserver`] is the default and forwards events to the
//! `log` facade.

use super::GuideSegment;

#[derive(Debug, Clone, Copy)]
pub enum GuideEvent<'a> {
    /// A segment was inserted at `index` in traversal order.
    SegmentAdded { segment: &'a GuideSegment, index: usize },
    /// A segment equal under the ordering to a stored one was discarded.
    DuplicateDropped { segment: &'a GuideSegment },
    /// The cursor moved onto the segment at `index`.
    SegmentEntered { segment: &'a GuideSegment, index: usize },
    /// The last segment has been fully consumed.
    Completed { segment_count: usize },
}

pub trait GuideObserver: Send + Sync {
    fn on_event(&self, event: GuideEvent<'_>);
}

/// Forwards events to `log` at debug level, completion at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl GuideObserver for LogObserver {
    fn on_event(&self, event: GuideEvent<'_>) {
        match event {
            GuideEvent::SegmentAdded { segment, index } => log::debug!(
                "adding guide segment #{index}: {:?} -> {:?} (next: {:?})",
                segment.start(),
                segment.end(),
                segment.next()
            ),
            GuideEvent::DuplicateDropped { segment } => log::debug!(
                "dropping duplicate guide segment {:?} -> {:?}",
                segment.start(),
                segment.end()
            ),
            GuideEvent::SegmentEntered { segment, index } => log::debug!(
                "next guide segment #{index}: {:?} -> {:?}",
                segment.start(),
                segment.end()
            ),
            GuideEvent::Completed { segment_count } => {
                log::info!("guide path complete after {segment_count} segments");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GuideObserver for NoopObserver {
    fn on_event(&self, _event: GuideEvent<'_>) {}
}
