//! Event handling and the stdio serve loop

use crate::protocol::{Event, HandlerResponse};
use anyhow::Result;
use chrono::{DateTime, Utc};
use docloom_core::generate::generate_blog;
use docloom_core::llm::TextGenerator;
use docloom_core::storage::{blog_key, ObjectStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Handles blog-generation events against a generator and an object store
pub struct BlogHandler<'a> {
    generator: &'a dyn TextGenerator,
    store: &'a dyn ObjectStore,
}

impl<'a> BlogHandler<'a> {
    pub fn new(generator: &'a dyn TextGenerator, store: &'a dyn ObjectStore) -> Self {
        Self { generator, store }
    }

    /// Handle one event
    pub async fn handle(&self, event: &Event) -> HandlerResponse {
        self.handle_at(event, Utc::now()).await
    }

    /// Handle one event with an explicit timestamp for the object key.
    ///
    /// Success means generated AND stored: a storage failure after
    /// successful generation is a 500, as is an empty generation result.
    pub async fn handle_at(&self, event: &Event, now: DateTime<Utc>) -> HandlerResponse {
        let topic = match event.blog_topic() {
            Ok(topic) => topic,
            Err(e) => {
                return HandlerResponse::error(400, &format!("Invalid request body: {}", e));
            }
        };

        let blog = generate_blog(self.generator, &topic).await;
        if blog.is_empty() {
            tracing::error!("No blog generated for topic: {}", topic);
            return HandlerResponse::error(500, "Failed to generate blog");
        }

        let key = blog_key(now);
        match self
            .store
            .put_object(&key, blog.as_bytes(), "text/plain")
            .await
        {
            Ok(()) => HandlerResponse::success("Blog generated and saved successfully"),
            Err(e) => {
                tracing::error!(
                    "Failed to save blog to s3://{}/{}: {}",
                    self.store.bucket(),
                    key,
                    e
                );
                HandlerResponse::error(500, "Failed to save blog")
            }
        }
    }

    /// Serve events from stdin, one JSON object per line
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let mut reader = BufReader::new(stdin);
        let mut writer = BufWriter::new(stdout);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Event>(trimmed) {
                Ok(event) => self.handle(&event).await,
                Err(e) => HandlerResponse::error(400, &format!("Invalid event: {}", e)),
            };

            let json = serde_json::to_string(&response)?;
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }
}
