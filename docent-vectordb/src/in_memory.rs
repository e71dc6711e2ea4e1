use std::collections::BTreeSet;
use std::{fmt, sync::Arc};

use async_trait::async_trait;
use docent_core::{Document, Embedding, Metadata, MetadataFilter};
use tokio::sync::RwLock;
use tracing::Instrument;

use crate::config::InMemoryVectorDbBuilder;
use crate::{SearchType, VectorDb, VectorDbError};

#[derive(Default)]
struct StoreInner {
    created: bool,
    entries: Vec<Entry>,
}

struct Entry {
    document: Document,
    embedding: Option<Vec<f32>>,
}

/// Process-local [`VectorDb`]. Clones share the same collection.
#[derive(Clone)]
pub struct InMemoryVectorDb {
    collection: String,
    embedder: Option<Arc<dyn Embedding>>,
    search_type: SearchType,
    hybrid_alpha: f32,
    inner: Arc<RwLock<StoreInner>>,
}

impl fmt::Debug for InMemoryVectorDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryVectorDb")
            .field("collection", &self.collection)
            .field("embedder", &self.embedder.as_ref().map(|e| e.dimension()))
            .field("search_type", &self.search_type)
            .field("hybrid_alpha", &self.hybrid_alpha)
            .finish()
    }
}

impl InMemoryVectorDb {
    pub fn builder() -> InMemoryVectorDbBuilder {
        InMemoryVectorDbBuilder::new()
    }

    pub(crate) fn from_parts(
        collection: String,
        embedder: Option<Arc<dyn Embedding>>,
        search_type: SearchType,
        hybrid_alpha: f32,
    ) -> Self {
        Self {
            collection,
            embedder,
            search_type,
            hybrid_alpha,
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    fn ensure_created(&self, inner: &StoreInner) -> Result<(), VectorDbError> {
        if inner.created {
            Ok(())
        } else {
            Err(VectorDbError::MissingCollection(self.collection.clone()))
        }
    }

    async fn prepare(
        &self,
        documents: &[Document],
        filters: Option<&Metadata>,
    ) -> Result<Vec<Entry>, VectorDbError> {
        let prepared: Vec<Document> = documents
            .iter()
            .cloned()
            .map(|mut doc| {
                if let Some(filters) = filters {
                    doc.meta_data
                        .extend(filters.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                doc
            })
            .collect();

        let embeddings: Vec<Option<Vec<f32>>> = match &self.embedder {
            Some(embedder) => {
                let texts: Vec<String> = prepared.iter().map(|doc| doc.content.clone()).collect();
                let embeddings = embedder.embed_batch(&texts).await?;
                if embeddings.len() != prepared.len() {
                    return Err(VectorDbError::OperationFailed(format!(
                        "embedder returned {} vectors for {} documents",
                        embeddings.len(),
                        prepared.len()
                    )));
                }
                let expected = embedder.dimension();
                if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
                    return Err(VectorDbError::DimensionMismatch {
                        expected,
                        got: bad.len(),
                    });
                }
                embeddings.into_iter().map(Some).collect()
            }
            None => vec![None; prepared.len()],
        };

        Ok(prepared
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| Entry {
                document,
                embedding,
            })
            .collect())
    }

    async fn scored_search(
        &self,
        mode: SearchType,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError> {
        let span = tracing::debug_span!(
            "in_memory_search",
            collection = %self.collection,
            search_type = ?mode,
            limit = limit,
        );

        async move {
            let query_embedding = match mode {
                SearchType::Keyword => None,
                SearchType::Vector | SearchType::Hybrid => {
                    let embedder = self.embedder.as_ref().ok_or(match mode {
                        SearchType::Hybrid => VectorDbError::MissingEmbedder("hybrid search"),
                        _ => VectorDbError::MissingEmbedder("vector search"),
                    })?;
                    Some(embedder.embed(query).await?)
                }
            };
            let query_terms = terms(query);

            let inner = self.inner.read().await;
            self.ensure_created(&inner)?;

            let mut scored: Vec<(f64, &Document)> = Vec::new();
            for entry in &inner.entries {
                if let Some(filter) = filter {
                    if !filter.matches(&entry.document.meta_data) {
                        continue;
                    }
                }
                let vector = || {
                    query_embedding
                        .as_deref()
                        .zip(entry.embedding.as_deref())
                        .map(|(q, e)| cosine_similarity(q, e))
                        .filter(|score| !score.is_nan())
                };
                let score = match mode {
                    SearchType::Keyword => {
                        let score = keyword_score(&query_terms, &entry.document.content);
                        if score <= 0.0 {
                            continue;
                        }
                        score
                    }
                    SearchType::Vector => vector().unwrap_or(f64::NEG_INFINITY),
                    SearchType::Hybrid => {
                        let alpha = f64::from(self.hybrid_alpha);
                        let keyword = keyword_score(&query_terms, &entry.document.content);
                        alpha * vector().unwrap_or(0.0) + (1.0 - alpha) * keyword
                    }
                };
                scored.push((score, &entry.document));
            }

            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            let results: Vec<Document> = scored
                .into_iter()
                .take(limit)
                .map(|(score, doc)| {
                    let mut result = doc.clone();
                    result.reranking_score = score.is_finite().then_some(score);
                    result
                })
                .collect();

            tracing::debug!(matches = results.len(), "search finished");
            Ok::<_, VectorDbError>(results)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl VectorDb for InMemoryVectorDb {
    async fn create(&self) -> Result<(), VectorDbError> {
        let mut inner = self.inner.write().await;
        if inner.created {
            tracing::debug!(collection = %self.collection, "collection already exists");
        } else {
            inner.created = true;
            tracing::info!(collection = %self.collection, "created in-memory collection");
        }
        Ok(())
    }

    async fn exists(&self) -> Result<bool, VectorDbError> {
        Ok(self.inner.read().await.created)
    }

    async fn doc_exists(&self, document: &Document) -> Result<bool, VectorDbError> {
        let inner = self.inner.read().await;
        self.ensure_created(&inner)?;
        Ok(inner
            .entries
            .iter()
            .any(|entry| entry.document.content == document.content))
    }

    async fn name_exists(&self, name: &str) -> Result<bool, VectorDbError> {
        let inner = self.inner.read().await;
        self.ensure_created(&inner)?;
        Ok(inner
            .entries
            .iter()
            .any(|entry| entry.document.name.as_deref() == Some(name)))
    }

    async fn id_exists(&self, id: &str) -> Result<bool, VectorDbError> {
        let inner = self.inner.read().await;
        self.ensure_created(&inner)?;
        Ok(inner
            .entries
            .iter()
            .any(|entry| entry.document.id.as_deref() == Some(id)))
    }

    async fn insert(
        &self,
        documents: &[Document],
        filters: Option<&Metadata>,
    ) -> Result<(), VectorDbError> {
        self.ensure_created(&*self.inner.read().await)?;
        let entries = self.prepare(documents, filters).await?;

        let mut inner = self.inner.write().await;
        self.ensure_created(&inner)?;
        inner.entries.extend(entries);
        tracing::debug!(
            collection = %self.collection,
            inserted = documents.len(),
            total = inner.entries.len(),
            "inserted documents"
        );
        Ok(())
    }

    fn upsert_available(&self) -> bool {
        true
    }

    async fn upsert(
        &self,
        documents: &[Document],
        filters: Option<&Metadata>,
    ) -> Result<(), VectorDbError> {
        self.ensure_created(&*self.inner.read().await)?;
        let entries = self.prepare(documents, filters).await?;

        let mut inner = self.inner.write().await;
        self.ensure_created(&inner)?;
        let mut replaced = 0usize;
        for entry in entries {
            let existing = match entry.document.id.as_deref() {
                Some(id) => inner
                    .entries
                    .iter()
                    .position(|stored| stored.document.id.as_deref() == Some(id)),
                None => inner
                    .entries
                    .iter()
                    .position(|stored| stored.document.content == entry.document.content),
            };
            match existing {
                Some(index) => {
                    inner.entries[index] = entry;
                    replaced += 1;
                }
                None => inner.entries.push(entry),
            }
        }
        tracing::debug!(
            collection = %self.collection,
            replaced = replaced,
            inserted = documents.len() - replaced,
            "upserted documents"
        );
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError> {
        self.scored_search(self.search_type, query, limit, filter).await
    }

    async fn vector_search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError> {
        self.scored_search(SearchType::Vector, query, limit, filter).await
    }

    async fn keyword_search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError> {
        self.scored_search(SearchType::Keyword, query, limit, filter).await
    }

    async fn hybrid_search(
        &self,
        query: &str,
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<Document>, VectorDbError> {
        self.scored_search(SearchType::Hybrid, query, limit, filter).await
    }

    async fn drop_db(&self) -> Result<(), VectorDbError> {
        let mut inner = self.inner.write().await;
        if inner.created {
            inner.created = false;
            inner.entries.clear();
            tracing::info!(collection = %self.collection, "dropped in-memory collection");
        }
        Ok(())
    }

    async fn optimize(&self) -> Result<(), VectorDbError> {
        let mut inner = self.inner.write().await;
        self.ensure_created(&inner)?;
        inner.entries.shrink_to_fit();
        Ok(())
    }

    async fn delete(&self) -> Result<bool, VectorDbError> {
        let mut inner = self.inner.write().await;
        if !inner.created || inner.entries.is_empty() {
            return Ok(false);
        }
        let removed = inner.entries.len();
        inner.entries.clear();
        tracing::info!(collection = %self.collection, removed = removed, "deleted documents");
        Ok(true)
    }
}

fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Share of distinct query terms that occur in `content`.
fn keyword_score(query_terms: &BTreeSet<String>, content: &str) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let content_terms = terms(content);
    let hits = query_terms
        .iter()
        .filter(|term| content_terms.contains(*term))
        .count();
    hits as f64 / query_terms.len() as f64
}

/// Accumulates in f64 so reported scores are not widened f32 values.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
