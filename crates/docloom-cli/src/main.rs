//! Docloom CLI
//!
//! Chat with PDF documents and generate content with Amazon Bedrock.

use anyhow::Result;
use clap::Parser;
use docloom_core::Config;

mod app;
mod commands;
mod progress;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Update(args) => commands::update::run(args, &config).await,
        Commands::Ask(args) => commands::ask::run(args, &config).await,
        Commands::Poem(args) => commands::poem::run(args, &config).await,
        Commands::Blog(args) => commands::blog::run(args, &config).await,
        Commands::Image(args) => commands::image::run(args, &config).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Serve => commands::serve::run(&config).await,
    }
}
