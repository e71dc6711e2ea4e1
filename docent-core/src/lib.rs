mod document;
mod embedding;
mod error;
mod metadata_filter;
pub mod prelude;
mod value;

pub use document::{Document, DocumentBuilder};
pub use embedding::Embedding;
pub use error::{DocumentError, EmbeddingError};
pub use metadata_filter::MetadataFilter;
pub use value::{Metadata, TryFromValue, Value};
