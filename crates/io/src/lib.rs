// File I/O operations

pub mod document;
pub mod error;
pub mod import;
pub mod json;

pub use document::{deserialize, serialize, Document, DocumentColumn};
pub use error::DocumentError;

/// File extension for journal documents
pub const DOCUMENT_EXTENSION: &str = "json";
