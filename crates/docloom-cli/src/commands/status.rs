//! Status command

use anyhow::Result;
use docloom_core::{Config, VectorIndex};

pub async fn run(config: &Config) -> Result<()> {
    let index_dir = &config.paths.index_dir;

    if !VectorIndex::exists(index_dir) {
        println!(
            "No vector index found at {}. Run 'docloom update' first.",
            index_dir.display()
        );
        return Ok(());
    }

    let index = VectorIndex::load(index_dir)?;
    println!("Index directory: {}", index_dir.display());
    println!(
        "Embedding model: {} ({} dimensions)",
        index.model(),
        index.dimensions()
    );
    println!("Chunks: {}", index.len());
    println!("Created: {}", index.created_at());

    Ok(())
}
