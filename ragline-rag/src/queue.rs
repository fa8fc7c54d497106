use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::IngestionError;
use crate::pipeline::IngestionPipeline;

struct IngestJob {
    folder_name: String,
}

/// Fire-and-forget front door for ingestion. `enqueue` returns as soon as
/// the job record is accepted; a single worker task consumes jobs and runs
/// the pipeline, so runs never interleave and completion is observable only
/// by listing collections afterwards.
#[derive(Clone)]
pub struct IngestQueue {
    sender: mpsc::Sender<IngestJob>,
}

impl IngestQueue {
    pub fn spawn(pipeline: Arc<IngestionPipeline>, capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<IngestJob>(capacity.max(1));

        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                match pipeline.run(&job.folder_name).await {
                    Ok(report) => {
                        tracing::info!(
                            collection = %report.collection,
                            documents = report.documents,
                            nodes = report.nodes,
                            dimension = report.dimension,
                            "ingest job finished"
                        );
                    }
                    Err(err) => {
                        tracing::error!(
                            collection = %job.folder_name,
                            error = %err,
                            "ingest job failed; re-upload to retry"
                        );
                    }
                }
            }
        });

        Self { sender }
    }

    pub fn enqueue(&self, folder_name: impl Into<String>) -> Result<(), IngestionError> {
        let job = IngestJob {
            folder_name: folder_name.into(),
        };
        self.sender.try_send(job).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => IngestionError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => IngestionError::WorkerGone,
        })
    }
}
