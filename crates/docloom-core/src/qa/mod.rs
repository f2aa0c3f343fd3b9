//! Retrieval-augmented question answering
//!
//! Embeds the query, retrieves the top-k chunks from the vector index,
//! stuffs them into the answer prompt and calls the chosen text generator.

use crate::error::Result;
use crate::index::VectorIndex;
use crate::llm::{Embedder, TextGenerator};

/// Number of source snippets retrieved per question
pub const TOP_K: usize = 3;

/// Answer prompt. Context and question are each substituted exactly once.
pub const PROMPT_TEMPLATE: &str = "\nHuman: Use the following pieces of context to provide a \
concise answer to the question at the end. If you don't know the answer, just say that you \
don't know. Don't try to make up an answer.\n<context>\n{context}\n</context>\n\nQuestion: \
{question}\nAssistant:\n";

/// Substitute context and question into the answer prompt
pub fn build_prompt(context: &str, question: &str) -> String {
    PROMPT_TEMPLATE
        .replacen("{question}", question, 1)
        .replacen("{context}", context, 1)
}

/// One retrieved source snippet
#[derive(Debug, Clone)]
pub struct SourceSnippet {
    pub source: String,
    pub title: String,
    pub position: usize,
    pub text: String,
    pub score: f32,
}

/// Answer plus the snippets it was conditioned on
#[derive(Debug, Clone)]
pub struct QaResponse {
    pub answer: String,
    pub sources: Vec<SourceSnippet>,
}

/// Retrieval QA chain over an index, an embedder and a generator
pub struct RetrievalQa<'a> {
    index: &'a VectorIndex,
    embedder: &'a dyn Embedder,
    generator: &'a dyn TextGenerator,
    top_k: usize,
}

impl<'a> RetrievalQa<'a> {
    pub fn new(
        index: &'a VectorIndex,
        embedder: &'a dyn Embedder,
        generator: &'a dyn TextGenerator,
    ) -> Self {
        Self {
            index,
            embedder,
            generator,
            top_k: TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a question from the indexed documents.
    ///
    /// A model reply of "I don't know" is returned as the answer like any
    /// other; no distinction is made from a missing answer.
    pub async fn answer(&self, question: &str) -> Result<QaResponse> {
        let query_embedding = self.embedder.embed(question).await?;
        let hits = self.index.search(&query_embedding, self.top_k);

        let sources: Vec<SourceSnippet> = hits
            .into_iter()
            .map(|(score, entry)| SourceSnippet {
                source: entry.source.clone(),
                title: entry.title.clone(),
                position: entry.position,
                text: entry.text.clone(),
                score,
            })
            .collect();

        let context = sources
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = build_prompt(&context, question);

        let answer = self.generator.generate(&prompt).await?;

        Ok(QaResponse { answer, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "fake-embed"
        }
    }

    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        reply: String,
    }

    impl RecordingGenerator {
        fn new(reply: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "fake-generator"
        }

        fn request_body(&self, prompt: &str) -> serde_json::Value {
            serde_json::json!({ "prompt": prompt })
        }
    }

    fn index_with_entries(n: usize) -> VectorIndex {
        let mut index = VectorIndex::new("fake-embed", 2);
        for i in 0..n {
            index
                .push(
                    IndexEntry {
                        source: format!("doc{}.pdf", i),
                        title: format!("Doc {}", i),
                        position: 0,
                        text: format!("chunk text {}", i),
                    },
                    vec![1.0 / (i + 1) as f32, 0.5],
                )
                .unwrap();
        }
        index
    }

    #[test]
    fn test_template_has_each_placeholder_once() {
        assert_eq!(PROMPT_TEMPLATE.matches("{context}").count(), 1);
        assert_eq!(PROMPT_TEMPLATE.matches("{question}").count(), 1);
    }

    #[test]
    fn test_build_prompt_substitutes_once() {
        let prompt = build_prompt("the context body", "what is rust?");
        assert_eq!(prompt.matches("the context body").count(), 1);
        assert_eq!(prompt.matches("what is rust?").count(), 1);
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{question}"));
        assert!(prompt.contains("<context>"));
        assert!(prompt.trim_end().ends_with("Assistant:"));
    }

    #[tokio::test]
    async fn test_answer_returns_at_most_top_k_sources() {
        let index = index_with_entries(10);
        let generator = RecordingGenerator::new("an answer");
        let qa = RetrievalQa::new(&index, &FakeEmbedder, &generator);

        let response = qa.answer("what is in the documents?").await.unwrap();
        assert_eq!(response.sources.len(), TOP_K);
        assert_eq!(response.answer, "an answer");
    }

    #[tokio::test]
    async fn test_answer_prompt_contains_question_and_snippets() {
        let index = index_with_entries(2);
        let generator = RecordingGenerator::new("ok");
        let qa = RetrievalQa::new(&index, &FakeEmbedder, &generator);

        qa.answer("the question?").await.unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].matches("the question?").count(), 1);
        assert!(prompts[0].contains("chunk text 0"));
        assert!(prompts[0].contains("chunk text 1"));
    }

    #[tokio::test]
    async fn test_dont_know_answer_surfaced_verbatim() {
        let index = index_with_entries(1);
        let generator = RecordingGenerator::new("I don't know.");
        let qa = RetrievalQa::new(&index, &FakeEmbedder, &generator);

        let response = qa.answer("anything?").await.unwrap();
        assert_eq!(response.answer, "I don't know.");
    }

    #[tokio::test]
    async fn test_empty_index_yields_no_sources() {
        let index = VectorIndex::new("fake-embed", 2);
        let generator = RecordingGenerator::new("nothing indexed");
        let qa = RetrievalQa::new(&index, &FakeEmbedder, &generator);

        let response = qa.answer("anything?").await.unwrap();
        assert!(response.sources.is_empty());
    }
}
