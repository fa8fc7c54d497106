use std::path::Path;

use async_trait::async_trait;

use crate::{Document, LoadError};

/// Produces the ordered document batch for one upload folder. Parsing of
/// document formats lives behind this seam, outside the core.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<Vec<Document>, LoadError>;
}
