/// Precondition violations raised by guide segments and guide paths.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GuideError {
    #[error("guide segment is degenerate (start and end coincide)")]
    DegenerateSegment,
    #[error("guide points must be finite")]
    NonFinitePoint,
    #[error("polyline requires at least {min} points, got {got}")]
    NotEnoughPoints { min: usize, got: usize },
    #[error("guide path has no segments")]
    EmptyPath,
    #[error("guide path is not initialized, call reset() first")]
    UninitializedPath,
    #[error("advance delta must not be negative (got {delta})")]
    NegativeAdvance { delta: f64 },
    #[error("advance delta must be finite")]
    NonFiniteAdvance,
    #[error("sampling step must be positive and finite (got {delta})")]
    InvalidStep { delta: f64 },
    #[error("sampling step {delta} would produce more than {limit} points")]
    TooManySamples { delta: f64, limit: usize },
}
