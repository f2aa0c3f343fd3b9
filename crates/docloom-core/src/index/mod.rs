//! Directory-backed vector index
//!
//! The index lives in a directory (`index.json` for metadata and chunk
//! records, `vectors.bin` for little-endian f32 embeddings) and is written
//! wholesale on every update. Similarity search is brute-force cosine over
//! all stored vectors.

pub mod builder;

pub use builder::{build_index, IndexStats};

use crate::error::{DocloomError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata file inside the index directory
pub const INDEX_FILE: &str = "index.json";

/// Embedding file inside the index directory
pub const VECTORS_FILE: &str = "vectors.bin";

/// One indexed chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Source document path, relative to the data directory
    pub source: String,

    /// Document title
    pub title: String,

    /// Byte offset of the chunk within the document
    pub position: usize,

    /// Chunk text
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexMetadata {
    model: String,
    dimensions: usize,
    created_at: String,
    entries: Vec<IndexEntry>,
}

/// In-memory vector index with directory persistence
pub struct VectorIndex {
    model: String,
    dimensions: usize,
    created_at: String,
    entries: Vec<IndexEntry>,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Create an empty index for the given embedding model
    pub fn new(model: &str, dimensions: usize) -> Self {
        Self {
            model: model.to_string(),
            dimensions,
            created_at: Utc::now().to_rfc3339(),
            entries: Vec::new(),
            vectors: Vec::new(),
        }
    }

    /// Append an entry and its embedding
    pub fn push(&mut self, entry: IndexEntry, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(DocloomError::Index(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimensions,
                vector.len()
            )));
        }
        self.entries.push(entry);
        self.vectors.push(vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Whether a saved index exists under the directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(INDEX_FILE).is_file() && dir.join(VECTORS_FILE).is_file()
    }

    /// Save to a directory, replacing any previous index wholesale
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let metadata = IndexMetadata {
            model: self.model.clone(),
            dimensions: self.dimensions,
            created_at: self.created_at.clone(),
            entries: self.entries.clone(),
        };
        std::fs::write(
            dir.join(INDEX_FILE),
            serde_json::to_vec_pretty(&metadata)?,
        )?;

        let mut bytes = Vec::with_capacity(self.vectors.len() * self.dimensions * 4);
        for vector in &self.vectors {
            bytes.extend_from_slice(&embedding_to_bytes(vector));
        }
        std::fs::write(dir.join(VECTORS_FILE), bytes)?;

        Ok(())
    }

    /// Load a saved index from a directory
    pub fn load(dir: &Path) -> Result<Self> {
        if !Self::exists(dir) {
            return Err(DocloomError::IndexNotFound(format!(
                "No vector index at {}. Run 'docloom update' first.",
                dir.display()
            )));
        }

        let metadata: IndexMetadata =
            serde_json::from_slice(&std::fs::read(dir.join(INDEX_FILE))?)?;
        let bytes = std::fs::read(dir.join(VECTORS_FILE))?;

        if metadata.dimensions == 0 {
            return Err(DocloomError::Index("Index has zero dimensions".into()));
        }

        let flat = bytes_to_embedding(&bytes);
        if flat.len() != metadata.entries.len() * metadata.dimensions {
            return Err(DocloomError::Index(format!(
                "Vector file length {} does not match {} entries of dimension {}",
                flat.len(),
                metadata.entries.len(),
                metadata.dimensions
            )));
        }

        let vectors = flat
            .chunks(metadata.dimensions)
            .map(|c| c.to_vec())
            .collect();

        Ok(Self {
            model: metadata.model,
            dimensions: metadata.dimensions,
            created_at: metadata.created_at,
            entries: metadata.entries,
            vectors,
        })
    }

    /// Top-k entries by cosine similarity, best first
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(f32, &IndexEntry)> {
        let mut scored: Vec<(f32, &IndexEntry)> = self
            .vectors
            .iter()
            .zip(self.entries.iter())
            .map(|(vector, entry)| (cosine_similarity(query, vector), entry))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Convert f32 embedding to bytes (little-endian)
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes to f32 embedding
pub fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: &str, text: &str) -> IndexEntry {
        IndexEntry {
            source: source.to_string(),
            title: source.to_string(),
            position: 0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_embedding_roundtrip() {
        let original = vec![1.0f32, 2.0, 3.0, -1.5];
        let bytes = embedding_to_bytes(&original);
        let restored = bytes_to_embedding(&bytes);
        assert_eq!(original, restored);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.0001);
    }

    #[test]
    fn test_push_rejects_dimension_mismatch() {
        let mut index = VectorIndex::new("test-model", 3);
        let result = index.push(entry("a.pdf", "text"), vec![1.0, 0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = VectorIndex::new("test-model", 3);
        index.push(entry("a.pdf", "alpha"), vec![1.0, 0.0, 0.0]).unwrap();
        index.push(entry("b.pdf", "beta"), vec![0.0, 1.0, 0.0]).unwrap();
        index.save(dir.path()).unwrap();

        let loaded = VectorIndex::load(dir.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.model(), "test-model");
        assert_eq!(loaded.dimensions(), 3);
        assert_eq!(loaded.entries()[0].text, "alpha");

        let results = loaded.search(&[1.0, 0.0, 0.0], 1);
        assert_eq!(results[0].1.source, "a.pdf");
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();

        let mut big = VectorIndex::new("test-model", 2);
        for i in 0..5 {
            big.push(entry(&format!("{}.pdf", i), "text"), vec![i as f32, 1.0])
                .unwrap();
        }
        big.save(dir.path()).unwrap();

        let mut small = VectorIndex::new("test-model", 2);
        small.push(entry("only.pdf", "text"), vec![1.0, 0.0]).unwrap();
        small.save(dir.path()).unwrap();

        let loaded = VectorIndex::load(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].source, "only.pdf");
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = VectorIndex::load(&dir.path().join("absent"));
        assert!(matches!(result, Err(DocloomError::IndexNotFound(_))));
    }

    #[test]
    fn test_search_returns_at_most_k() {
        let mut index = VectorIndex::new("test-model", 2);
        for i in 0..10 {
            index
                .push(entry(&format!("{}.pdf", i), "text"), vec![i as f32, 1.0])
                .unwrap();
        }
        let results = index.search(&[1.0, 1.0], 3);
        assert_eq!(results.len(), 3);
        // Best-first ordering
        assert!(results[0].0 >= results[1].0);
        assert!(results[1].0 >= results[2].0);
    }

    #[test]
    fn test_search_fewer_entries_than_k() {
        let mut index = VectorIndex::new("test-model", 2);
        index.push(entry("a.pdf", "text"), vec![1.0, 0.0]).unwrap();
        let results = index.search(&[1.0, 0.0], 3);
        assert_eq!(results.len(), 1);
    }
}
