// Prelude module for docent-core
//
// Import commonly used types with: `use docent_core::prelude::*;`

pub use crate::{
    // Documents
    Document,
    DocumentBuilder,
    DocumentError,
    // Embeddings
    Embedding,
    EmbeddingError,
    // Metadata
    Metadata,
    MetadataFilter,
    TryFromValue,
    Value,
};
