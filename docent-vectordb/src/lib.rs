//! Vector database contract for Docent documents, plus an in-memory backend.

mod config;
mod error;
mod hash_embedder;
mod in_memory;
mod vector_db;

pub use config::InMemoryVectorDbBuilder;
pub use error::{VectorDbError, VectorDbResult};
pub use hash_embedder::HashEmbedder;
pub use in_memory::InMemoryVectorDb;
pub use vector_db::{SearchType, VectorDb};
