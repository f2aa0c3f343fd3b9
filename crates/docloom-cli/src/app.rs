//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docloom")]
#[command(
    author,
    version,
    about = "Chat with PDF documents and generate content with Amazon Bedrock"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the vector index from the data directory
    Update(UpdateArgs),

    /// Answer a question from the indexed documents
    Ask(AskArgs),

    /// Generate a Shakespearean poem
    Poem(PoemArgs),

    /// Generate a blog post
    Blog(BlogArgs),

    /// Generate an image
    Image(ImageArgs),

    /// Show index status
    Status,

    /// Serve blog-generation events on stdin/stdout
    Serve,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Directory of source PDFs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for the saved index
    #[arg(long)]
    pub index_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct AskArgs {
    /// Question to answer
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Answer model
    #[arg(long, value_enum, default_value = "claude")]
    pub model: QaModel,

    /// Number of source snippets to retrieve
    #[arg(short = 'k', long, default_value = "3")]
    pub top_k: usize,

    /// Hide the retrieved source snippets
    #[arg(long)]
    pub no_sources: bool,

    /// Directory of the saved index
    #[arg(long)]
    pub index_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QaModel {
    Claude,
    Llama3,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PoemModel {
    Haiku,
    Llama3,
}

#[derive(Args)]
pub struct PoemArgs {
    /// Poem topic
    pub topic: Vec<String>,

    /// Generation model
    #[arg(long, value_enum, default_value = "haiku")]
    pub model: PoemModel,

    /// Print the request payload instead of invoking the model
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct BlogArgs {
    /// Blog topic
    #[arg(required = true)]
    pub topic: Vec<String>,

    /// Upload the generated post to S3
    #[arg(long)]
    pub upload: bool,

    /// Print the request payload instead of invoking the model
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ImageArgs {
    /// Image prompt
    pub prompt: Vec<String>,

    /// Output path for the PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the request payload instead of invoking the model
    #[arg(long)]
    pub dry_run: bool,
}
