//! S3 object storage for generated content

use crate::bedrock::client::host_header;
use crate::bedrock::sign::{self, Credentials, SignatureParams};
use crate::config::{AwsConfig, StorageConfig};
use crate::error::{DocloomError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use std::time::Duration;

const SERVICE: &str = "s3";

/// Key prefix for uploaded blog posts
pub const BLOG_KEY_PREFIX: &str = "blog-output/";

/// Object key for a blog post generated at `now`
pub fn blog_key(now: DateTime<Utc>) -> String {
    format!("{}{}.txt", BLOG_KEY_PREFIX, now.format("%Y-%m-%d %H:%M:%S"))
}

/// Object storage trait
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object under the given key
    async fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()>;

    /// Bucket name objects are stored in
    fn bucket(&self) -> &str;
}

/// S3-backed object store
pub struct S3Store {
    http: reqwest::Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl S3Store {
    /// Create from storage and AWS configuration
    pub fn new(storage: &StorageConfig, aws: &AwsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(aws.timeout_secs))
            .build()
            .map_err(DocloomError::Http)?;
        Ok(Self {
            http,
            bucket: storage.bucket.clone(),
            region: aws.region.clone(),
            endpoint: storage.s3_url.clone(),
        })
    }

    /// Object URL and the canonical path it signs as.
    ///
    /// Virtual-hosted style against AWS, path style against an endpoint
    /// override. S3 single-encodes path segments, so the canonical URI is
    /// the path as sent.
    fn object_url(&self, key: &str) -> Result<(Url, String)> {
        let encoded_key = sign::uri_encode(key, false);
        let (base, path) = match self.endpoint {
            Some(ref endpoint) => (
                endpoint.clone(),
                format!("/{}/{}", self.bucket, encoded_key),
            ),
            None => (
                format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
                format!("/{}", encoded_key),
            ),
        };
        let url = Url::parse(&format!("{}{}", base, path))
            .map_err(|e| DocloomError::Config(format!("Invalid S3 endpoint: {}", e)))?;
        Ok((url, path))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        let credentials = Credentials::from_env().ok_or_else(|| {
            DocloomError::Config(
                "AWS credentials not configured. Set AWS_ACCESS_KEY_ID and \
                 AWS_SECRET_ACCESS_KEY."
                    .to_string(),
            )
        })?;

        let (url, canonical_path) = self.object_url(key)?;

        let headers = sign::sign(
            &SignatureParams {
                method: "PUT",
                host: &host_header(&url),
                canonical_uri: &canonical_path,
                query: &[],
                content_type: Some(content_type),
                payload: body,
                region: &self.region,
                service: SERVICE,
                now: Utc::now(),
            },
            &credentials,
        );

        let mut request = self
            .http
            .put(url)
            .header("content-type", content_type)
            .body(body.to_vec());
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(DocloomError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DocloomError::Storage(format!(
                "S3 error (HTTP {}) storing {}: {}",
                status, key, text
            )));
        }

        tracing::debug!("Stored s3://{}/{}", self.bucket, key);
        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
