//! Error taxonomy for the analysis core
//!
//! Every failure is reported on the offending `detect`/`step` call and leaves
//! the caller's state evaluable: rejected input never corrupts later bars.

use thiserror::Error;

/// Errors produced by the swing detector and momentum-shift engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The evaluation window cannot be formed yet
    #[error("insufficient data: {needed} bars required, {available} available")]
    InsufficientData { needed: usize, available: usize },

    /// A parameter was rejected at construction time
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An input bar violates the feed preconditions
    #[error("malformed bar at index {index}: {reason}")]
    MalformedBar { index: u64, reason: String },
}
