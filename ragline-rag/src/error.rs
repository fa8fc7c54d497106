use thiserror::Error;

use ragline_core::RaglineError;

/// Failures of the background ingest queue itself (the pipeline's own
/// failures are reported per run through [`RaglineError`]).
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("ingest queue is full")]
    QueueFull,
    #[error("ingest worker has shut down")]
    WorkerGone,
}

impl From<IngestionError> for RaglineError {
    fn from(err: IngestionError) -> Self {
        RaglineError::Custom(err.to_string())
    }
}
