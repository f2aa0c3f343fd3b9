//! Update command: rebuild the vector index

use crate::app::UpdateArgs;
use crate::progress::ProgressReporter;
use anyhow::Result;
use docloom_core::{build_index, BedrockClient, Config, PdfProvider, SourceProvider, TitanEmbedder};
use std::sync::Arc;

pub async fn run(args: UpdateArgs, config: &Config) -> Result<()> {
    let data_dir = args.data_dir.unwrap_or_else(|| config.paths.data_dir.clone());
    let index_dir = args
        .index_dir
        .unwrap_or_else(|| config.paths.index_dir.clone());

    println!("Scanning {} for PDF documents...", data_dir.display());
    let provider = PdfProvider::new();
    let items = provider.list_items(&data_dir).await?;
    if items.is_empty() {
        anyhow::bail!("No PDF documents found in {}", data_dir.display());
    }
    println!("Found {} documents", items.len());

    let client = Arc::new(BedrockClient::new(config.aws.clone())?);
    let embedder = TitanEmbedder::new(client, &config.models);

    let (index, stats) =
        build_index(&items, &embedder, Some(Box::new(ProgressReporter::update))).await?;
    ProgressReporter::finish(index.len());

    index.save(&index_dir)?;

    println!(
        "Vector store updated successfully: {} documents, {} chunks -> {}",
        stats.documents,
        stats.chunks,
        index_dir.display()
    );
    if stats.skipped_duplicates > 0 {
        println!("Skipped {} duplicate documents", stats.skipped_duplicates);
    }

    Ok(())
}
