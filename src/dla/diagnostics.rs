use std::fmt;

/// Counters collected while a guide path is authored and walked.
///
/// `truncated_advances` counts `advance` calls that left progress at or
/// beyond 1.0 on a segment that still has a successor. The path only crosses
/// one segment boundary per call, so a driver seeing this grow is stepping
/// faster than the guides can follow.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuideDiagnostics {
    pub segment_count: usize,
    pub duplicates_dropped: usize,
    pub resets: usize,
    pub advance_calls: usize,
    pub segments_entered: usize,
    pub truncated_advances: usize,
}

impl GuideDiagnostics {
    /// True when no authoring or stepping anomaly was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates_dropped == 0 && self.truncated_advances == 0
    }
}

impl fmt::Display for GuideDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segments={} duplicates={} resets={} advances={} entered={} truncated={}",
            self.segment_count,
            self.duplicates_dropped,
            self.resets,
            self.advance_calls,
            self.segments_entered,
            self.truncated_advances
        )
    }
}
