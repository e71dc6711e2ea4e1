//! Ordered document collections that can be loaded into a vector database.

mod knowledge_base;

pub use knowledge_base::{DocumentKnowledgeBase, LoadOptions};
