//! Ask command: retrieval QA over the indexed documents

use crate::app::{AskArgs, QaModel};
use anyhow::Result;
use docloom_core::{
    BedrockClient, ClaudeGenerator, Config, LlamaGenerator, RetrievalQa, TextGenerator,
    TitanEmbedder, VectorIndex,
};
use std::sync::Arc;

pub async fn run(args: AskArgs, config: &Config) -> Result<()> {
    let question = args.question.join(" ");
    let index_dir = args
        .index_dir
        .unwrap_or_else(|| config.paths.index_dir.clone());

    let index = VectorIndex::load(&index_dir)?;

    let client = Arc::new(BedrockClient::new(config.aws.clone())?);
    let embedder = TitanEmbedder::new(client.clone(), &config.models);
    let generator: Box<dyn TextGenerator> = match args.model {
        QaModel::Claude => Box::new(ClaudeGenerator::qa(client, &config.models.claude_model)),
        QaModel::Llama3 => Box::new(LlamaGenerator::qa(client, &config.models.llama_model)),
    };

    eprintln!("Generating response with {}...", generator.model_name());

    let qa = RetrievalQa::new(&index, &embedder, generator.as_ref()).with_top_k(args.top_k);
    let response = qa.answer(&question).await?;

    println!("{}", response.answer.trim());

    if !args.no_sources {
        println!();
        println!("Source documents:");
        for snippet in &response.sources {
            println!("--- {} (score {:.3})", snippet.source, snippet.score);
            println!("{}", snippet.text.trim());
        }
    }

    Ok(())
}
