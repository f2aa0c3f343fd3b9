//! Poem command

use crate::app::{PoemArgs, PoemModel};
use anyhow::Result;
use docloom_core::generate::{generate_poem, poem_prompt, DEFAULT_POEM_TOPIC};
use docloom_core::{BedrockClient, Config, HaikuGenerator, LlamaGenerator, TextGenerator};
use std::sync::Arc;

pub async fn run(args: PoemArgs, config: &Config) -> Result<()> {
    let topic = if args.topic.is_empty() {
        DEFAULT_POEM_TOPIC.to_string()
    } else {
        args.topic.join(" ")
    };

    let client = Arc::new(BedrockClient::new(config.aws.clone())?);
    let generator: Box<dyn TextGenerator> = match args.model {
        PoemModel::Haiku => Box::new(HaikuGenerator::poem(client, &config.models.haiku_model)),
        PoemModel::Llama3 => Box::new(LlamaGenerator::poem(client, &config.models.llama_model)),
    };

    if args.dry_run {
        let body = generator.request_body(&poem_prompt(&topic));
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let poem = generate_poem(generator.as_ref(), &topic).await?;
    println!("{}", poem.trim());

    Ok(())
}
