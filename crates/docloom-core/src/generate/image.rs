//! Stable Diffusion image generation

use crate::bedrock::payload::{DiffusionRequest, DiffusionResponse, TextPrompt};
use crate::bedrock::BedrockClient;
use crate::error::Result;
use std::path::Path;

/// Default image prompt
pub const DEFAULT_IMAGE_PROMPT: &str = "Create an image of a futuristic city skyline at \
sunset, with flying cars and neon lights. The city should have a mix of modern skyscrapers \
and green spaces, with a vibrant atmosphere. The sky should be filled with shades of orange, \
pink, and purple, reflecting the setting sun. The scene should be dynamic and full of energy, \
capturing the essence of a bustling metropolis in the future.";

/// Diffusion parameters
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub cfg_scale: u32,
    pub speed: u32,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            cfg_scale: 10,
            speed: 0,
            steps: 50,
            width: 1024,
            height: 1024,
        }
    }
}

/// Build the diffusion request for a prompt
pub fn image_request(prompt: &str, options: &ImageOptions) -> DiffusionRequest {
    DiffusionRequest {
        text_prompts: vec![TextPrompt {
            text: prompt.to_string(),
            weight: 1.0,
        }],
        cfg_scale: options.cfg_scale,
        speed: options.speed,
        steps: options.steps,
        width: options.width,
        height: options.height,
    }
}

/// Generate an image, returning the decoded PNG bytes
pub async fn generate_image(
    client: &BedrockClient,
    model_id: &str,
    prompt: &str,
    options: &ImageOptions,
) -> Result<Vec<u8>> {
    let body = serde_json::to_value(image_request(prompt, options))?;
    let response = client.invoke_model(model_id, &body).await?;
    let parsed: DiffusionResponse = serde_json::from_value(response)?;
    parsed.decode_image()
}

/// Write PNG bytes to disk
pub fn save_image(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_defaults() {
        let request = image_request("a red barn", &ImageOptions::default());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["text_prompts"][0]["text"], "a red barn");
        assert_eq!(json["text_prompts"][0]["weight"], 1.0);
        assert_eq!(json["cfg_scale"], 10);
        assert_eq!(json["speed"], 0);
        assert_eq!(json["steps"], 50);
        assert_eq!(json["width"], 1024);
        assert_eq!(json["height"], 1024);
    }

    #[test]
    fn test_save_image_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let bytes = vec![0x89, b'P', b'N', b'G', 1, 2, 3];
        save_image(&bytes, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_save_image_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.png");
        save_image(&[1, 2, 3], &path).unwrap();
        assert!(path.is_file());
    }
}
