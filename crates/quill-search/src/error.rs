//! Error types for the occurrence finder.

/// Errors returned by the occurrence finder.
///
/// Both conditions are local to a single call and are not worth retrying
/// with the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The search pattern was rejected (currently: it was empty).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller-supplied deadline passed before the corpus was exhausted.
    #[error("search deadline exceeded after scanning {articles_scanned} articles")]
    DeadlineExceeded {
        /// Number of articles fully scanned before the deadline was noticed.
        articles_scanned: usize,
    },
}
