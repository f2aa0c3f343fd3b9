//! Titan embedder over the Bedrock runtime

use crate::bedrock::payload::{TitanEmbedRequest, TitanEmbedResponse};
use crate::bedrock::BedrockClient;
use crate::config::ModelConfig;
use crate::error::Result;
use crate::llm::Embedder;
use async_trait::async_trait;
use std::sync::Arc;

/// Embedder backed by the Titan embedding model
pub struct TitanEmbedder {
    client: Arc<BedrockClient>,
    model_id: String,
    dimensions: usize,
}

impl TitanEmbedder {
    /// Create from a client and model configuration
    pub fn new(client: Arc<BedrockClient>, models: &ModelConfig) -> Self {
        Self {
            client,
            model_id: models.embedding_model.clone(),
            dimensions: models.embedding_dimensions,
        }
    }
}

#[async_trait]
impl Embedder for TitanEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = TitanEmbedRequest {
            input_text: text.to_string(),
        };
        let body = serde_json::to_value(&request)?;
        let response = self.client.invoke_model(&self.model_id, &body).await?;
        let parsed: TitanEmbedResponse = serde_json::from_value(response)?;
        Ok(parsed.embedding)
    }

    // Titan has no batch endpoint; embed one text per call, in order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}
