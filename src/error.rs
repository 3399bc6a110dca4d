use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by a chat turn or a session call.
///
/// `RunTimeout` is distinct from `RunFailed` so callers can tell
/// "possibly still running remotely" apart from "definitely failed".
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required request field was missing or empty. Raised before any
    /// upstream call is made.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The run did not reach a terminal state within the configured bound.
    /// The run is left running remotely; no cancel is issued.
    #[error("run did not complete within {0:?}")]
    RunTimeout(Duration),

    /// The run reached a terminal state other than `completed`. The observed
    /// status string is preserved for diagnostics.
    #[error("run ended with status: {status}")]
    RunFailed { status: String },

    /// Transport, authentication, or any other unexpected failure from the
    /// upstream service. The message text is passed through uninterpreted.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Upstream(err.to_string())
    }
}
