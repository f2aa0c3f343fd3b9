//! Index building pipeline: ingest, chunk, embed, assemble

use crate::error::Result;
use crate::index::{IndexEntry, VectorIndex};
use crate::ingest::{chunk_by_chars, SourceItem, CHUNK_OVERLAP_CHARS, CHUNK_SIZE_CHARS};
use crate::llm::Embedder;
use std::collections::HashSet;

const BATCH_SIZE: usize = 32;

/// Statistics from an index build
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub documents: usize,
    pub chunks: usize,
    pub skipped_duplicates: usize,
}

/// Build a fresh vector index from source items.
///
/// Documents with identical content hashes are embedded once. The progress
/// callback receives (embedded chunks, total chunks) after each batch.
pub async fn build_index(
    items: &[SourceItem],
    embedder: &dyn Embedder,
    progress: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
) -> Result<(VectorIndex, IndexStats)> {
    let mut index = VectorIndex::new(embedder.model_name(), embedder.dimensions());
    let mut stats = IndexStats::default();

    let mut seen = HashSet::new();
    let mut pending: Vec<IndexEntry> = Vec::new();

    for item in items {
        if !seen.insert(item.hash.clone()) {
            tracing::warn!("Skipping duplicate document content: {}", item.source);
            stats.skipped_duplicates += 1;
            continue;
        }
        stats.documents += 1;

        for chunk in chunk_by_chars(&item.content, CHUNK_SIZE_CHARS, CHUNK_OVERLAP_CHARS) {
            pending.push(IndexEntry {
                source: item.source.clone(),
                title: item.title.clone(),
                position: chunk.position,
                text: chunk.text,
            });
        }
    }

    stats.chunks = pending.len();

    for batch in pending.chunks(BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|e| e.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        for (entry, embedding) in batch.iter().zip(embeddings) {
            index.push(entry.clone(), embedding)?;
        }

        if let Some(ref callback) = progress {
            callback(index.len(), stats.chunks);
        }
    }

    Ok((index, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;

    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let len = text.len() as f32;
            Ok(vec![len, 1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::new();
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "fake-embed"
        }
    }

    fn item(source: &str, content: &str) -> SourceItem {
        SourceItem::new(source.to_string(), source.to_string(), content.to_string())
    }

    #[tokio::test]
    async fn test_build_index_counts() {
        let items = vec![item("a.pdf", "short document"), item("b.pdf", "another one")];
        let (index, stats) = build_index(&items, &FakeEmbedder, None).await.unwrap();

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.chunks, 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.model(), "fake-embed");
    }

    #[tokio::test]
    async fn test_build_index_skips_duplicate_content() {
        let items = vec![item("a.pdf", "same text"), item("copy.pdf", "same text")];
        let (index, stats) = build_index(&items, &FakeEmbedder, None).await.unwrap();

        assert_eq!(stats.documents, 1);
        assert_eq!(stats.skipped_duplicates, 1);
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_build_index_chunks_long_documents() {
        let long = "sentence here. ".repeat(200);
        let items = vec![item("long.pdf", &long)];
        let (index, stats) = build_index(&items, &FakeEmbedder, None).await.unwrap();

        assert!(stats.chunks > 1);
        assert_eq!(index.len(), stats.chunks);
        assert_eq!(index.entries()[0].source, "long.pdf");
    }

    #[tokio::test]
    async fn test_build_index_reports_progress() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_cb = calls.clone();
        let items = vec![item("a.pdf", "doc one"), item("b.pdf", "doc two")];

        build_index(
            &items,
            &FakeEmbedder,
            Some(Box::new(move |_done, _total| {
                calls_in_cb.fetch_add(1, Ordering::Relaxed);
            })),
        )
        .await
        .unwrap();

        assert!(calls.load(Ordering::Relaxed) >= 1);
    }
}
