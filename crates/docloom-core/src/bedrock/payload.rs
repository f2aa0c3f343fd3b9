//! Typed request and response bodies per model family
//!
//! Field names follow the wire shapes of each Bedrock model family and must
//! not be renamed.

use crate::error::{DocloomError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Titan embedding request
#[derive(Debug, Clone, Serialize)]
pub struct TitanEmbedRequest {
    #[serde(rename = "inputText")]
    pub input_text: String,
}

/// Titan embedding response
#[derive(Debug, Deserialize)]
pub struct TitanEmbedResponse {
    pub embedding: Vec<f32>,
}

/// Claude text-completion request (claude-2 and claude-3 direct invoke)
#[derive(Debug, Clone, Serialize)]
pub struct ClaudeRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(rename = "topP")]
    pub top_p: f64,
}

/// Claude-2 chain-style response
#[derive(Debug, Deserialize)]
pub struct ClaudeCompletionResponse {
    pub completion: String,
}

/// Claude-3 direct-invoke response
#[derive(Debug, Deserialize)]
pub struct ClaudeMessagesResponse {
    pub completions: Vec<ClaudeCompletion>,
}

#[derive(Debug, Deserialize)]
pub struct ClaudeCompletion {
    pub data: ClaudeCompletionData,
}

#[derive(Debug, Deserialize)]
pub struct ClaudeCompletionData {
    pub text: String,
}

impl ClaudeMessagesResponse {
    /// Text of the first completion (`completions[0].data.text`)
    pub fn text(self) -> Result<String> {
        self.completions
            .into_iter()
            .next()
            .map(|c| c.data.text)
            .ok_or_else(|| DocloomError::Parse("Claude response contained no completions".into()))
    }
}

/// Llama 3 request
#[derive(Debug, Clone, Serialize)]
pub struct LlamaRequest {
    pub prompt: String,
    pub max_gen_len: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub top_p: f64,
}

/// Llama 3 response
#[derive(Debug, Deserialize)]
pub struct LlamaResponse {
    pub generation: String,
}

/// Stable Diffusion text prompt entry
#[derive(Debug, Clone, Serialize)]
pub struct TextPrompt {
    pub text: String,
    pub weight: f64,
}

/// Stable Diffusion XL request
#[derive(Debug, Clone, Serialize)]
pub struct DiffusionRequest {
    pub text_prompts: Vec<TextPrompt>,
    pub cfg_scale: u32,
    pub speed: u32,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

/// Stable Diffusion XL response
#[derive(Debug, Deserialize)]
pub struct DiffusionResponse {
    pub artifacts: Vec<DiffusionArtifact>,
}

#[derive(Debug, Deserialize)]
pub struct DiffusionArtifact {
    pub base64: String,
}

impl DiffusionResponse {
    /// Decode `artifacts[0].base64` into PNG bytes
    pub fn decode_image(&self) -> Result<Vec<u8>> {
        let artifact = self.artifacts.first().ok_or_else(|| {
            DocloomError::Parse("image response contained no artifacts".into())
        })?;
        Ok(base64::engine::general_purpose::STANDARD.decode(&artifact.base64)?)
    }
}
