use std::{fmt, sync::Arc};

use docent_core::Embedding;

use crate::{InMemoryVectorDb, SearchType, VectorDbError};

pub(crate) const DEFAULT_COLLECTION: &str = "documents";
pub(crate) const DEFAULT_HYBRID_ALPHA: f32 = 0.5;

#[derive(Default, Clone)]
pub struct InMemoryVectorDbBuilder {
    collection: Option<String>,
    embedder: Option<Arc<dyn Embedding>>,
    search_type: Option<SearchType>,
    hybrid_alpha: Option<f32>,
}

impl fmt::Debug for InMemoryVectorDbBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryVectorDbBuilder")
            .field("collection", &self.collection)
            .field("embedder", &self.embedder.as_ref().map(|e| e.dimension()))
            .field("search_type", &self.search_type)
            .field("hybrid_alpha", &self.hybrid_alpha)
            .finish()
    }
}

impl InMemoryVectorDbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, value: impl Into<String>) -> Self {
        self.collection = Some(value.into());
        self
    }

    pub fn embedder(mut self, value: Arc<dyn Embedding>) -> Self {
        self.embedder = Some(value);
        self
    }

    pub fn search_type(mut self, value: SearchType) -> Self {
        self.search_type = Some(value);
        self
    }

    /// Weight of the vector score in hybrid search; the keyword score gets
    /// `1 - alpha`.
    pub fn hybrid_alpha(mut self, value: f32) -> Self {
        self.hybrid_alpha = Some(value);
        self
    }

    /// Without an explicit search type, vector search is used when an
    /// embedder is configured and keyword search otherwise.
    pub fn build(self) -> Result<InMemoryVectorDb, VectorDbError> {
        let collection = self
            .collection
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        if collection.trim().is_empty() {
            return Err(VectorDbError::InvalidConfig(
                "collection cannot be empty".to_string(),
            ));
        }

        let search_type = self.search_type.unwrap_or(if self.embedder.is_some() {
            SearchType::Vector
        } else {
            SearchType::Keyword
        });
        if search_type != SearchType::Keyword && self.embedder.is_none() {
            return Err(VectorDbError::InvalidConfig(format!(
                "search type {search_type:?} requires an embedder"
            )));
        }

        let hybrid_alpha = self.hybrid_alpha.unwrap_or(DEFAULT_HYBRID_ALPHA);
        if !(0.0..=1.0).contains(&hybrid_alpha) {
            return Err(VectorDbError::InvalidConfig(format!(
                "hybrid_alpha must be within [0, 1], got {hybrid_alpha}"
            )));
        }

        Ok(InMemoryVectorDb::from_parts(
            collection,
            self.embedder,
            search_type,
            hybrid_alpha,
        ))
    }
}
