//! Documents, knowledge bases and vector stores for Rust LLM agents.
//!
//! ```
//! use docent::Document;
//!
//! let doc = Document::new("hello").with_id("doc-1");
//! assert_eq!(doc.to_json().unwrap(), r#"{"content":"hello","meta_data":{},"id":"doc-1"}"#);
//! ```

pub use docent_core::*;

#[cfg(feature = "vectordb")]
pub mod vectordb {
    pub use docent_vectordb::*;
}

#[cfg(feature = "knowledge")]
pub mod knowledge {
    pub use docent_knowledge::*;
}

#[cfg(feature = "memory")]
pub mod memory {
    pub use docent_memory::*;
}
