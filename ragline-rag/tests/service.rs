use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ragline_core::{ChatLlm, GenerationError, Message};
use ragline_embeddings::HashEmbedder;
use ragline_rag::{DirectoryLoader, InMemoryCollectionStore, RagConfig, RagService};

struct EchoLlm;

#[async_trait::async_trait]
impl ChatLlm for EchoLlm {
    async fn chat(&self, messages: &[Message]) -> Result<String, GenerationError> {
        let query = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        Ok(format!("echo: {query}"))
    }
}

async fn write_upload(root: &Path, folder: &str, file: &str, text: &str) {
    let dir = root.join(folder);
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join(file), text).await.unwrap();
}

fn service_over(uploads_root: &Path) -> RagService {
    let config = RagConfig {
        uploads_root: uploads_root.to_path_buf(),
        ..RagConfig::default()
    };
    RagService::new(
        config,
        Arc::new(InMemoryCollectionStore::new()),
        Arc::new(DirectoryLoader::new()),
        Arc::new(HashEmbedder::new(16)),
        Arc::new(EchoLlm),
    )
}

/// Polls until the background worker has published the collection. Bounded
/// so a stuck worker fails the test instead of hanging it.
async fn wait_for_collection(service: &RagService, name: &str) {
    for _ in 0..200 {
        let collections = service.list_collections().await.unwrap();
        if collections.iter().any(|c| c == name) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("collection {name} never appeared");
}

#[tokio::test]
async fn ingest_runs_in_background_and_becomes_listable() {
    let uploads = tempfile::tempdir().unwrap();
    write_upload(
        uploads.path(),
        "notes",
        "notes.txt",
        "The launch is scheduled for Tuesday. Bring the reports.",
    )
    .await;

    let service = service_over(uploads.path());

    service.ingest("notes").unwrap();
    // Returning Ok only means the job was queued.
    wait_for_collection(&service, "notes").await;
}

#[tokio::test]
async fn chat_answers_against_an_ingested_collection() {
    let uploads = tempfile::tempdir().unwrap();
    write_upload(
        uploads.path(),
        "notes",
        "notes.txt",
        "The capital of the project is quality.",
    )
    .await;

    let service = service_over(uploads.path());
    service.ingest("notes").unwrap();
    wait_for_collection(&service, "notes").await;

    let answer = service.chat("notes", "what matters?").await.unwrap();
    assert_eq!(answer, "echo: what matters?");
}

#[tokio::test]
async fn chat_before_any_ingest_is_not_found() {
    let uploads = tempfile::tempdir().unwrap();
    let service = service_over(uploads.path());

    let err = service.chat("notes", "hello?").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_collection_removes_it_and_rejects_ghosts() {
    let uploads = tempfile::tempdir().unwrap();
    write_upload(uploads.path(), "notes", "notes.txt", "A short document.").await;

    let service = service_over(uploads.path());
    service.ingest("notes").unwrap();
    wait_for_collection(&service, "notes").await;

    service.delete_collection("notes").await.unwrap();
    assert!(service.list_collections().await.unwrap().is_empty());

    let err = service.delete_collection("notes").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn failed_ingest_leaves_no_collection_behind() {
    let uploads = tempfile::tempdir().unwrap();
    write_upload(uploads.path(), "good", "a.txt", "Something to index.").await;

    let service = service_over(uploads.path());

    // Folder does not exist; the worker logs the failure and moves on.
    service.ingest("missing").unwrap();
    service.ingest("good").unwrap();
    wait_for_collection(&service, "good").await;

    let collections = service.list_collections().await.unwrap();
    assert_eq!(collections, vec!["good".to_string()]);
}
