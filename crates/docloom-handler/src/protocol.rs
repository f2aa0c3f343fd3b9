//! Event and response types

use serde::{Deserialize, Serialize};

/// Fallback topic when the event carries none
pub const NO_TOPIC_FALLBACK: &str = "No blog topic provided";

/// Incoming event envelope; `body` is a JSON string like `{"blog": "<topic>"}`
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct BlogRequest {
    blog: Option<String>,
}

impl Event {
    /// Extract the blog topic from the event body.
    ///
    /// A body that is not valid JSON is an error; a valid body without a
    /// `blog` field falls back to [`NO_TOPIC_FALLBACK`].
    pub fn blog_topic(&self) -> Result<String, serde_json::Error> {
        let request: BlogRequest = serde_json::from_str(&self.body)?;
        Ok(request.blog.unwrap_or_else(|| NO_TOPIC_FALLBACK.to_string()))
    }
}

/// HTTP-style response
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// 200 with a `message` body
    pub fn success(message: &str) -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!({ "message": message }).to_string(),
        }
    }

    /// Error status with an `error` body
    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }
}
