//! Configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bedrock model identifiers used by the pipelines
pub mod model_ids {
    pub const TITAN_EMBED: &str = "amazon.titan-embed-image-v1";
    pub const CLAUDE_2: &str = "anthropic.claude-2";
    pub const CLAUDE_3_HAIKU: &str = "anthropic.claude-3-haiku-20240307-v1:0";
    pub const LLAMA_3_70B: &str = "meta.llama3-70b-instruct-v1:0";
    pub const STABLE_DIFFUSION_XL: &str = "stability.stable-diffusion-xl-v1:0";
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// AWS endpoint and credential settings
    #[serde(default)]
    pub aws: AwsConfig,

    /// Model identifiers and embedding dimensions
    #[serde(default)]
    pub models: ModelConfig,

    /// Local filesystem paths
    #[serde(default)]
    pub paths: PathsConfig,

    /// Object storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// AWS service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region for Bedrock and S3
    #[serde(default = "default_region")]
    pub region: String,

    /// Override for the Bedrock runtime endpoint (used by tests and local gateways)
    #[serde(default)]
    pub bedrock_url: Option<String>,

    /// Bearer API key; when set, requests use it instead of SigV4 signing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Read timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum request attempts (standard retry mode)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| default_region()),
            bedrock_url: std::env::var("DOCLOOM_BEDROCK_URL").ok(),
            api_key: std::env::var("AWS_BEARER_TOKEN_BEDROCK").ok(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl AwsConfig {
    /// Bedrock runtime endpoint (override or the regional default)
    pub fn bedrock_endpoint(&self) -> String {
        self.bedrock_url.clone().unwrap_or_else(|| {
            format!("https://bedrock-runtime.{}.amazonaws.com", self.region)
        })
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_max_attempts() -> u32 {
    3
}

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Embedding model
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// QA model used by the `claude` answer path
    #[serde(default = "default_claude_model")]
    pub claude_model: String,

    /// Direct-invoke Claude model for poem generation
    #[serde(default = "default_haiku_model")]
    pub haiku_model: String,

    /// Llama model used for QA, poem and blog generation
    #[serde(default = "default_llama_model")]
    pub llama_model: String,

    /// Image generation model
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            claude_model: default_claude_model(),
            haiku_model: default_haiku_model(),
            llama_model: default_llama_model(),
            image_model: default_image_model(),
        }
    }
}

fn default_embedding_model() -> String {
    model_ids::TITAN_EMBED.to_string()
}

fn default_embedding_dimensions() -> usize {
    1024
}

fn default_claude_model() -> String {
    model_ids::CLAUDE_2.to_string()
}

fn default_haiku_model() -> String {
    model_ids::CLAUDE_3_HAIKU.to_string()
}

fn default_llama_model() -> String {
    model_ids::LLAMA_3_70B.to_string()
}

fn default_image_model() -> String {
    model_ids::STABLE_DIFFUSION_XL.to_string()
}

/// Local filesystem paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned for source PDFs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding the saved vector index
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Output path for generated images
    #[serde(default = "default_image_output")]
    pub image_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::var("DOCLOOM_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            index_dir: std::env::var("DOCLOOM_INDEX_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_index_dir()),
            image_output: default_image_output(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(crate::DATA_DIR)
}

fn default_index_dir() -> PathBuf {
    PathBuf::from(crate::INDEX_DIR)
}

fn default_image_output() -> PathBuf {
    PathBuf::from(crate::IMAGE_OUTPUT_PATH)
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Target S3 bucket for generated blog posts
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Override for the S3 endpoint (used by tests and local gateways)
    #[serde(default)]
    pub s3_url: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: std::env::var("DOCLOOM_S3_BUCKET").unwrap_or_else(|_| default_bucket()),
            s3_url: std::env::var("DOCLOOM_S3_URL").ok(),
        }
    }
}

fn default_bucket() -> String {
    "workwithgenaiblog".to_string()
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_ids() {
        let models = ModelConfig::default();
        assert_eq!(models.embedding_model, "amazon.titan-embed-image-v1");
        assert_eq!(models.claude_model, "anthropic.claude-2");
        assert_eq!(models.haiku_model, "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(models.llama_model, "meta.llama3-70b-instruct-v1:0");
        assert_eq!(models.image_model, "stability.stable-diffusion-xl-v1:0");
    }

    #[test]
    fn test_bedrock_endpoint_uses_region() {
        let aws = AwsConfig {
            region: "us-west-1".to_string(),
            bedrock_url: None,
            api_key: None,
            timeout_secs: 300,
            max_attempts: 3,
        };
        assert_eq!(
            aws.bedrock_endpoint(),
            "https://bedrock-runtime.us-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_bedrock_endpoint_override() {
        let aws = AwsConfig {
            region: "us-east-1".to_string(),
            bedrock_url: Some("http://localhost:9000".to_string()),
            api_key: None,
            timeout_secs: 300,
            max_attempts: 3,
        };
        assert_eq!(aws.bedrock_endpoint(), "http://localhost:9000");
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.storage.bucket, config.storage.bucket);
        assert_eq!(parsed.models.embedding_model, config.models.embedding_model);
    }
}
