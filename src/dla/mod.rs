//! Guide lines for diffusion-limited aggregation.
//!
//! A [`GuidePath`] holds directed [`GuideSegment`]s in the order given by a
//! [`SegmentOrder`] and exposes a cursor that a growth simulation advances in
//! small steps, asking for the position and heading to deposit along.
//!
//! ```ignore
//! use dla_engine::dla::GuidePath;
//! use dla_engine::geom::Point3;
//!
//! let mut guides = GuidePath::new();
//! guides.add_polyline(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ])?;
//! guides.reset()?;
//! while !guides.is_complete() {
//!     guides.advance(0.05)?;
//!     let p = guides.current_position()?;
//!     let heading = guides.current_direction()?;
//! }
//! ```

mod diagnostics;
mod error;
mod observer;
mod order;
mod path;
mod segment;

pub use diagnostics::GuideDiagnostics;
pub use error::GuideError;
pub use observer::{GuideEvent, GuideObserver, LogObserver, NoopObserver};
pub use order::{PipelineOrder, RadialDistanceOrder, SegmentOrder};
pub use path::{GuidePath, MAX_SAMPLE_POINTS, TraversalState};
pub use segment::GuideSegment;

#[cfg(test)]
mod tests;
