//! Amazon Bedrock runtime access
//!
//! HTTP client, request signing and the typed request/response payloads for
//! each model family the pipelines invoke.

pub mod client;
pub mod payload;
pub mod sign;

pub use client::BedrockClient;
pub use sign::Credentials;
