use thiserror::Error;

/// Failure taxonomy for collection and merging.
///
/// Everything here is a terminal caller error: none of these are retried.
/// Transient upstream failures (network, rate limits) are not modeled and
/// propagate as opaque `anyhow` errors from the client implementation.
#[derive(Debug, Error)]
pub enum CollectError {
    /// An enumerated filter option fell outside the allowed vocabulary.
    #[error("invalid {kind}: {value}")]
    InvalidFilter { kind: &'static str, value: String },

    /// One or more requested subreddits do not exist. Aggregated over the
    /// whole batch so a single run reports every offending name at once.
    #[error("subreddit(s) do not exist: {}", names.join(", "))]
    TargetNotFound { names: Vec<String> },

    /// A merge was attempted across tables with differing column sets.
    /// `missing` are columns the new table lacks, `extra` are columns it
    /// carries that history does not.
    #[error("both tables must have the same columns (missing: {missing:?}, extra: {extra:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },
}
