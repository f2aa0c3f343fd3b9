//! Docloom Core Library
//!
//! Core functionality for docloom: retrieval-augmented question answering
//! over local PDF documents and one-shot content generation, backed by
//! Amazon Bedrock managed inference endpoints.
//!
//! # Features
//! - PDF ingestion with character chunking and natural break points
//! - Titan embeddings and a directory-backed vector index
//! - Retrieval QA through Claude or Llama 3 text generation
//! - Poem, blog post and Stable Diffusion image generation
//! - S3 publishing for generated blog posts

pub mod bedrock;
pub mod config;
pub mod error;
pub mod generate;
pub mod index;
pub mod ingest;
pub mod llm;
pub mod qa;
pub mod storage;

pub use bedrock::{BedrockClient, Credentials};
pub use config::{AwsConfig, Config, ModelConfig, PathsConfig, StorageConfig};
pub use error::{DocloomError, Error, Result};
pub use index::{build_index, IndexEntry, IndexStats, VectorIndex};
pub use ingest::{chunk_by_chars, Chunk, PdfProvider, SourceItem, SourceProvider};
pub use llm::{
    ClaudeGenerator, Embedder, HaikuGenerator, LlamaGenerator, TextGenerator, TitanEmbedder,
};
pub use qa::{build_prompt, QaResponse, RetrievalQa, SourceSnippet, PROMPT_TEMPLATE, TOP_K};
pub use storage::{blog_key, ObjectStore, S3Store};

/// Default directory scanned for source PDF documents
pub const DATA_DIR: &str = "data";

/// Default directory holding the saved vector index
pub const INDEX_DIR: &str = "faiss_index";

/// Default output path for generated images
pub const IMAGE_OUTPUT_PATH: &str = "output_image.png";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "docloom";
