use docent_core::Document;
use docent_vectordb::{VectorDb, VectorDbError};
use serde::{Deserialize, Serialize};

/// How [`DocumentKnowledgeBase::load`] writes into a vector database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Drop the collection first.
    pub recreate: bool,
    /// Upsert instead of insert when the backend supports it.
    pub upsert: bool,
    /// On insert, skip documents whose content is already stored.
    pub skip_existing: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentKnowledgeBase {
    pub documents: Vec<Document>,
}

impl DocumentKnowledgeBase {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Yields each document as its own single-element batch.
    pub fn document_lists_iter(&self) -> impl Iterator<Item = Vec<Document>> + '_ {
        self.documents.iter().map(|doc| vec![doc.clone()])
    }

    pub fn iter_documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.documents.iter()
    }

    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Writes every batch into `db`, creating the collection if needed.
    /// Returns the number of documents written.
    pub async fn load(
        &self,
        db: &dyn VectorDb,
        options: LoadOptions,
    ) -> Result<usize, VectorDbError> {
        if options.recreate {
            tracing::info!("dropping collection before load");
            db.drop_db().await?;
        }
        if !db.exists().await? {
            db.create().await?;
        }

        let upsert = options.upsert && db.upsert_available();
        if options.upsert && !upsert {
            tracing::warn!("vector db does not support upsert; inserting instead");
        }

        let mut written = 0usize;
        let mut skipped = 0usize;
        for batch in self.document_lists_iter() {
            if upsert {
                db.upsert(&batch, None).await?;
                written += batch.len();
                continue;
            }

            let mut pending = Vec::with_capacity(batch.len());
            for doc in batch {
                if options.skip_existing && db.doc_exists(&doc).await? {
                    skipped += 1;
                    continue;
                }
                pending.push(doc);
            }
            if !pending.is_empty() {
                db.insert(&pending, None).await?;
                written += pending.len();
            }
        }

        tracing::info!(
            written = written,
            skipped = skipped,
            upsert = upsert,
            "loaded knowledge base"
        );
        Ok(written)
    }
}
