use ragline_core::{Document, Node, RaglineError};

use crate::SentenceSplitter;

/// Splits every document and pairs each flat chunk with its source
/// document's metadata, preserving global order (all chunks of document 0
/// precede all chunks of document 1, and so on).
///
/// The flat chunk list and the chunk-to-document mapping are built side by
/// side; if they ever diverge something is wrong with the splitter itself
/// and the run must abort, so that case is an invariant error rather than a
/// recoverable one.
pub fn build_nodes(
    documents: &[Document],
    splitter: &SentenceSplitter,
) -> Result<Vec<Node>, RaglineError> {
    let mut chunks: Vec<String> = Vec::new();
    let mut doc_indexes: Vec<usize> = Vec::new();

    for (doc_index, document) in documents.iter().enumerate() {
        let doc_chunks = splitter.split(&document.content);
        doc_indexes.extend(std::iter::repeat(doc_index).take(doc_chunks.len()));
        chunks.extend(doc_chunks);
    }

    if chunks.len() != doc_indexes.len() {
        return Err(RaglineError::Invariant(format!(
            "chunk/document alignment lost: {} chunks but {} document indexes",
            chunks.len(),
            doc_indexes.len()
        )));
    }

    let mut nodes = Vec::with_capacity(chunks.len());
    for (chunk, doc_index) in chunks.into_iter().zip(doc_indexes) {
        let source = documents.get(doc_index).ok_or_else(|| {
            RaglineError::Invariant(format!(
                "chunk mapped to document {doc_index} but only {} documents were loaded",
                documents.len()
            ))
        })?;
        nodes.push(Node::new(chunk, source.metadata.clone()));
    }

    Ok(nodes)
}
