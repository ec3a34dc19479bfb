// Error types for the reporting layer

use thiserror::Error;

/// Errors a render or registry lookup can surface. A failing test is normal
/// input and never produces one of these; only the machinery itself can fail.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The sink refused a write. Fatal for that render only; the external
    /// driver decides whether to abort the run.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),

    /// An event could not be serialized by the JSON profile.
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Registry lookup with a selector no profile claims.
    #[error("unknown reporting profile: {0}")]
    UnknownProfile(String),
}
