//! Document ingestion
//!
//! Source providers turn external documents into text items; the chunker
//! splits item text into overlapping character chunks for embedding.

pub mod chunker;
pub mod pdf;

pub use chunker::{chunk_by_chars, Chunk, CHUNK_OVERLAP_CHARS, CHUNK_SIZE_CHARS};
pub use pdf::PdfProvider;

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Source provider trait - all content sources must implement this
#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    /// Provider type identifier (e.g., "pdf")
    fn provider_type(&self) -> &'static str;

    /// List all items under a base directory
    async fn list_items(&self, base_path: &Path) -> Result<Vec<SourceItem>>;
}

/// Item produced by a source provider
#[derive(Debug, Clone)]
pub struct SourceItem {
    /// Path of the source document, relative to the scanned directory
    pub source: String,

    /// Display title for the item
    pub title: String,

    /// Full extracted text
    pub content: String,

    /// Content hash (SHA-256)
    pub hash: String,
}

impl SourceItem {
    pub fn new(source: String, title: String, content: String) -> Self {
        let hash = hash_content(&content);
        Self {
            source,
            title,
            content,
            hash,
        }
    }
}

/// Hex SHA-256 of document content, used for duplicate suppression
pub fn hash_content(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
