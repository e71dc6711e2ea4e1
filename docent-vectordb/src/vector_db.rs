use async_trait::async_trait;
use docent_core::{Document, Metadata, MetadataFilter};
use serde::{Deserialize, Serialize};

use crate::VectorDbError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Vector,
    Keyword,
    Hybrid,
}

/// A collection of documents that can be searched by text.
///
/// Search results are copies of the stored documents with `reranking_score`
/// set to the match score, best match first.
#[async_trait]
pub trait VectorDb: Send + Sync {
    /// Creates the backing collection. Creating an existing collection is a no-op.
    async fn create(&self) -> Result<(), VectorDbError>;

    async fn exists(&self) -> Result<bool, VectorDbError>;

    /// True when a stored document has the same content.
    async fn doc_exists(&self, document: &Document) -> Result<bool, VectorDbError>;

    async fn name_exists(&self, name: &str) -> Result<bool, VectorDbError>;

    async fn id_exists(&self, id: &str) -> Result<bool, VectorDbError>;

    /// Stores `documents`. Entries of `filters` are merged into each stored
    /// document's `meta_data`, overriding keys already present.
    async fn insert(
        &self,
        documents: &[Document],
        filters: Option<&Metadata>,
    ) -> Result<(), VectorDbError>;

    fn upsert_available(&self) -> bool {
        false
    }

    async fn upsert(
        &self,
        _documents: &[Document],
        _filters: Option<&Metadata>,
    ) -> Result<(), VectorDbError> {
        Err(VectorDbError::NotImplemented("upsert"))
    }

    /// Searches with the backend's configured [`SearchType`].
    async fn search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError>;

    async fn vector_search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError>;

    async fn keyword_search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError>;

    async fn hybrid_search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError>;

    /// Removes the collection itself.
    async fn drop_db(&self) -> Result<(), VectorDbError>;

    async fn optimize(&self) -> Result<(), VectorDbError> {
        Ok(())
    }

    /// Removes every document but keeps the collection. Returns whether
    /// anything was removed.
    async fn delete(&self) -> Result<bool, VectorDbError>;
}
