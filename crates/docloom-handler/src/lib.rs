//! Blog-generation entry point
//!
//! Accepts API-gateway-style JSON events carrying a blog topic, generates a
//! post, publishes it to object storage and answers with an HTTP-style
//! status code and JSON body. The `serve` loop reads one event per line on
//! stdin and writes one response per line on stdout.

pub mod protocol;
pub mod server;

pub use protocol::{Event, HandlerResponse, NO_TOPIC_FALLBACK};
pub use server::BlogHandler;
