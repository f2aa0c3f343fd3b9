//! HTTP client for the Bedrock runtime endpoint

use crate::bedrock::sign::{self, Credentials, SignatureParams};
use crate::config::AwsConfig;
use crate::error::{DocloomError, Result};
use chrono::Utc;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

const SERVICE: &str = "bedrock";
const RETRY_BASE_DELAY_MS: u64 = 200;

/// Client for `InvokeModel` calls against the Bedrock runtime.
///
/// Holds one `reqwest::Client` for the process lifetime. Requests are signed
/// with SigV4 from environment credentials, or sent with a bearer API key
/// when one is configured. Transport errors, 429 and 5xx responses are
/// retried up to the configured attempt count (standard mode) with a
/// doubling backoff.
pub struct BedrockClient {
    http: reqwest::Client,
    config: AwsConfig,
}

impl BedrockClient {
    /// Create a new client from configuration
    pub fn new(config: AwsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(DocloomError::Http)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(AwsConfig::default())
    }

    /// Configured region
    pub fn region(&self) -> &str {
        &self.config.region
    }

    /// Invoke a model with a JSON request body, returning the JSON response body
    pub async fn invoke_model(&self, model_id: &str, body: &Value) -> Result<Value> {
        let payload = serde_json::to_vec(body)?;

        let encoded_model = sign::uri_encode(model_id, true);
        let path = format!("/model/{}/invoke", encoded_model);
        let url = Url::parse(&format!("{}{}", self.config.bedrock_endpoint(), path))
            .map_err(|e| DocloomError::Config(format!("Invalid Bedrock endpoint: {}", e)))?;

        let mut attempt = 0;
        loop {
            attempt += 1;

            match self.send(&url, &encoded_model, &payload).await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json().await.map_err(DocloomError::Http)?);
                    }

                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    let text = response.text().await.unwrap_or_default();
                    if !retryable || attempt >= self.config.max_attempts {
                        return Err(DocloomError::ExternalError(format!(
                            "Bedrock error (HTTP {}): {}",
                            status, text
                        )));
                    }
                    tracing::warn!(
                        "Bedrock HTTP {} for {} (attempt {}), retrying",
                        status,
                        model_id,
                        attempt
                    );
                }
                Err(DocloomError::Http(e)) if attempt < self.config.max_attempts => {
                    tracing::warn!(
                        "Bedrock request for {} failed (attempt {}), retrying: {}",
                        model_id,
                        attempt,
                        e
                    );
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(Duration::from_millis(RETRY_BASE_DELAY_MS << attempt)).await;
        }
    }

    async fn send(
        &self,
        url: &Url,
        encoded_model: &str,
        payload: &[u8],
    ) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .post(url.clone())
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .body(payload.to_vec());

        if let Some(ref api_key) = self.config.api_key {
            request = request.header("authorization", format!("Bearer {}", api_key));
        } else {
            let credentials = Credentials::from_env().ok_or_else(|| {
                DocloomError::Config(
                    "AWS credentials not configured. Set AWS_ACCESS_KEY_ID and \
                     AWS_SECRET_ACCESS_KEY, or AWS_BEARER_TOKEN_BEDROCK."
                        .to_string(),
                )
            })?;

            // Non-S3 services double-encode path segments in the canonical URI
            let canonical_uri =
                format!("/model/{}/invoke", sign::uri_encode(encoded_model, true));
            let headers = sign::sign(
                &SignatureParams {
                    method: "POST",
                    host: &host_header(url),
                    canonical_uri: &canonical_uri,
                    query: &[],
                    content_type: Some("application/json"),
                    payload,
                    region: &self.config.region,
                    service: SERVICE,
                    now: Utc::now(),
                },
                &credentials,
            );
            for (name, value) in headers {
                request = request.header(name, value);
            }
        }

        request.send().await.map_err(DocloomError::Http)
    }
}

/// Host header value including a non-default port
pub(crate) fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_header_default_port() {
        let url = Url::parse("https://bedrock-runtime.us-east-1.amazonaws.com/model/x/invoke")
            .unwrap();
        assert_eq!(host_header(&url), "bedrock-runtime.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_host_header_explicit_port() {
        let url = Url::parse("http://localhost:9000/model/x/invoke").unwrap();
        assert_eq!(host_header(&url), "localhost:9000");
    }

    #[test]
    fn test_client_builds_without_credentials() {
        // Construction never touches the network or the credential chain
        let client = BedrockClient::new(AwsConfig {
            region: "us-east-1".to_string(),
            bedrock_url: None,
            api_key: None,
            timeout_secs: 300,
            max_attempts: 3,
        });
        assert!(client.is_ok());
    }
}
