//! Text generators for the Claude and Llama model families

use crate::bedrock::payload::{
    ClaudeCompletionResponse, ClaudeMessagesResponse, ClaudeRequest, LlamaRequest, LlamaResponse,
};
use crate::bedrock::BedrockClient;
use crate::error::Result;
use crate::llm::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;

/// Claude-2 generator, chain-style: response text comes back in `completion`
pub struct ClaudeGenerator {
    client: Arc<BedrockClient>,
    model_id: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

impl ClaudeGenerator {
    /// QA preset used by the retrieval chain
    pub fn qa(client: Arc<BedrockClient>, model_id: &str) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            max_tokens: 2000,
            temperature: 1.0,
            top_p: 1.0,
        }
    }

    fn request(&self, prompt: &str) -> ClaudeRequest {
        ClaudeRequest {
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::to_value(self.request(prompt))?;
        let response = self.client.invoke_model(&self.model_id, &body).await?;
        let parsed: ClaudeCompletionResponse = serde_json::from_value(response)?;
        Ok(parsed.completion)
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::to_value(self.request(prompt)).expect("Claude request serializes")
    }
}

/// Claude-3 direct-invoke generator: response text at `completions[0].data.text`
pub struct HaikuGenerator {
    client: Arc<BedrockClient>,
    model_id: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

impl HaikuGenerator {
    /// Poem preset
    pub fn poem(client: Arc<BedrockClient>, model_id: &str) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            max_tokens: 512,
            temperature: 0.8,
            top_p: 0.8,
        }
    }

    fn request(&self, prompt: &str) -> ClaudeRequest {
        ClaudeRequest {
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

#[async_trait]
impl TextGenerator for HaikuGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::to_value(self.request(prompt))?;
        let response = self.client.invoke_model(&self.model_id, &body).await?;
        let parsed: ClaudeMessagesResponse = serde_json::from_value(response)?;
        parsed.text()
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::to_value(self.request(prompt)).expect("Claude request serializes")
    }
}

/// Llama 3 generator: response text comes back in `generation`
pub struct LlamaGenerator {
    client: Arc<BedrockClient>,
    model_id: String,
    max_gen_len: u32,
    temperature: Option<f64>,
    top_p: f64,
    /// Wrap the prompt in `[INST] .. [/INST]` before sending
    wrap_inst: bool,
}

impl LlamaGenerator {
    /// QA preset used by the retrieval chain
    pub fn qa(client: Arc<BedrockClient>, model_id: &str) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            max_gen_len: 2000,
            temperature: Some(0.1),
            top_p: 0.9,
            wrap_inst: false,
        }
    }

    /// Poem preset
    pub fn poem(client: Arc<BedrockClient>, model_id: &str) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            max_gen_len: 1024,
            temperature: None,
            top_p: 0.9,
            wrap_inst: true,
        }
    }

    /// Blog preset; the blog template carries its own instruction wrapper
    pub fn blog(client: Arc<BedrockClient>, model_id: &str) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            max_gen_len: 512,
            temperature: Some(0.5),
            top_p: 0.9,
            wrap_inst: false,
        }
    }

    fn request(&self, prompt: &str) -> LlamaRequest {
        let prompt = if self.wrap_inst {
            format!("[INST]{}[/INST]", prompt)
        } else {
            prompt.to_string()
        };
        LlamaRequest {
            prompt,
            max_gen_len: self.max_gen_len,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

#[async_trait]
impl TextGenerator for LlamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::to_value(self.request(prompt))?;
        let response = self.client.invoke_model(&self.model_id, &body).await?;
        let parsed: LlamaResponse = serde_json::from_value(response)?;
        Ok(parsed.generation)
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::to_value(self.request(prompt)).expect("Llama request serializes")
    }
}
