//! Serve command: blog-generation events over stdin/stdout

use anyhow::Result;
use docloom_core::{BedrockClient, Config, LlamaGenerator, S3Store};
use docloom_handler::BlogHandler;
use std::sync::Arc;

pub async fn run(config: &Config) -> Result<()> {
    let client = Arc::new(BedrockClient::new(config.aws.clone())?);
    let generator = LlamaGenerator::blog(client, &config.models.llama_model);
    let store = S3Store::new(&config.storage, &config.aws)?;

    let handler = BlogHandler::new(&generator, &store);
    handler.run_stdio().await
}
