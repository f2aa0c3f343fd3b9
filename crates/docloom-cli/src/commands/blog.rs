//! Blog command

use crate::app::BlogArgs;
use anyhow::Result;
use chrono::Utc;
use docloom_core::generate::{blog_prompt, generate_blog};
use docloom_core::storage::blog_key;
use docloom_core::{BedrockClient, Config, LlamaGenerator, ObjectStore, S3Store, TextGenerator};
use std::sync::Arc;

pub async fn run(args: BlogArgs, config: &Config) -> Result<()> {
    let topic = args.topic.join(" ");

    let client = Arc::new(BedrockClient::new(config.aws.clone())?);
    let generator = LlamaGenerator::blog(client, &config.models.llama_model);

    if args.dry_run {
        let body = generator.request_body(&blog_prompt(&topic));
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let blog = generate_blog(&generator, &topic).await;
    if blog.is_empty() {
        anyhow::bail!("No blog generated.");
    }

    println!("{}", blog.trim());

    if args.upload {
        let store = S3Store::new(&config.storage, &config.aws)?;
        let key = blog_key(Utc::now());
        store.put_object(&key, blog.as_bytes(), "text/plain").await?;
        eprintln!("Uploaded to s3://{}/{}", store.bucket(), key);
    }

    Ok(())
}
