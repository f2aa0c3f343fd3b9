//! AWS Signature Version 4 request signing
//!
//! Implements the canonical request / string-to-sign / derived-key scheme
//! used by Bedrock runtime and S3 REST calls. Callers supply the canonical
//! URI already encoded the way the target service expects (S3 single-encodes
//! path segments, every other service double-encodes them).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// AWS credentials resolved from the environment
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    /// Read credentials from the standard AWS environment variables
    pub fn from_env() -> Option<Self> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        Some(Self {
            access_key_id,
            secret_access_key,
            session_token: std::env::var("AWS_SESSION_TOKEN").ok(),
        })
    }
}

/// Everything needed to sign one request
pub struct SignatureParams<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Canonical URI, pre-encoded per the target service's rules
    pub canonical_uri: &'a str,
    /// Query pairs, unencoded
    pub query: &'a [(&'a str, &'a str)],
    pub content_type: Option<&'a str>,
    pub payload: &'a [u8],
    pub region: &'a str,
    pub service: &'a str,
    pub now: DateTime<Utc>,
}

/// Sign a request, returning the headers to attach to it.
///
/// The returned list contains `x-amz-date`, `x-amz-content-sha256`,
/// `x-amz-security-token` (when a session token is present) and
/// `authorization`. The `host` and `content-type` headers are folded into the
/// signature but left for the HTTP client to set.
pub fn sign(params: &SignatureParams<'_>, credentials: &Credentials) -> Vec<(String, String)> {
    let amz_date = params.now.format("%Y%m%dT%H%M%SZ").to_string();
    let datestamp = params.now.format("%Y%m%d").to_string();
    let payload_hash = sha256_hex(params.payload);

    let mut headers: Vec<(String, String)> = vec![
        ("host".to_string(), params.host.to_string()),
        ("x-amz-content-sha256".to_string(), payload_hash.clone()),
        ("x-amz-date".to_string(), amz_date.clone()),
    ];
    if let Some(content_type) = params.content_type {
        headers.push(("content-type".to_string(), content_type.to_string()));
    }
    if let Some(ref token) = credentials.session_token {
        headers.push(("x-amz-security-token".to_string(), token.clone()));
    }
    headers.sort_by(|a, b| a.0.cmp(&b.0));

    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical = canonical_request(
        params.method,
        params.canonical_uri,
        &canonical_query_string(params.query),
        &headers,
        &signed_headers,
        &payload_hash,
    );

    let scope = format!(
        "{}/{}/{}/aws4_request",
        datestamp, params.region, params.service
    );
    let sts = string_to_sign(&amz_date, &scope, &sha256_hex(canonical.as_bytes()));

    let signing_key = derive_signing_key(
        &credentials.secret_access_key,
        &datestamp,
        params.region,
        params.service,
    );
    let signature = hex(&hmac_sha256(&signing_key, sts.as_bytes()));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, credentials.access_key_id, scope, signed_headers, signature
    );

    let mut out: Vec<(String, String)> = headers
        .into_iter()
        .filter(|(name, _)| name != "host" && name != "content-type")
        .collect();
    out.push(("authorization".to_string(), authorization));
    out
}

/// Build the canonical request string.
///
/// `headers` must be lowercase-named, trimmed and sorted; `signed_headers`
/// is the semicolon-joined name list in the same order.
pub fn canonical_request(
    method: &str,
    canonical_uri: &str,
    canonical_query: &str,
    headers: &[(String, String)],
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();

    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, canonical_uri, canonical_query, canonical_headers, signed_headers, payload_hash
    )
}

/// Build the string to sign from the request hash
pub fn string_to_sign(amz_date: &str, scope: &str, canonical_hash: &str) -> String {
    format!("{}\n{}\n{}\n{}", ALGORITHM, amz_date, scope, canonical_hash)
}

/// Derive the per-day signing key
pub fn derive_signing_key(secret: &str, datestamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), datestamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Canonical query string: encoded pairs sorted by name, then value
pub fn canonical_query_string(query: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(name, value)| (uri_encode(name, true), uri_encode(value, true)))
        .collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode per RFC 3986 with the SigV4 unreserved set.
///
/// `encode_slash` controls whether `/` is escaped; path encoding keeps it,
/// query encoding escapes it.
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Hex-encoded SHA-256 digest
pub fn sha256_hex(data: &[u8]) -> String {
    hex(&Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    // Published AWS derivation example
    #[test]
    fn test_derive_signing_key_vector() {
        let key = derive_signing_key(EXAMPLE_SECRET, "20120215", "us-east-1", "iam");
        assert_eq!(
            hex(&key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    // Published AWS GET ListUsers example
    #[test]
    fn test_canonical_request_and_signature_vector() {
        let headers = vec![
            (
                "content-type".to_string(),
                "application/x-www-form-urlencoded; charset=utf-8".to_string(),
            ),
            ("host".to_string(), "iam.amazonaws.com".to_string()),
            ("x-amz-date".to_string(), "20150830T123600Z".to_string()),
        ];
        let canonical = canonical_request(
            "GET",
            "/",
            &canonical_query_string(&[("Action", "ListUsers"), ("Version", "2010-05-08")]),
            &headers,
            "content-type;host;x-amz-date",
            &sha256_hex(b""),
        );
        assert_eq!(
            sha256_hex(canonical.as_bytes()),
            "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
        );

        let sts = string_to_sign(
            "20150830T123600Z",
            "20150830/us-east-1/iam/aws4_request",
            &sha256_hex(canonical.as_bytes()),
        );
        let key = derive_signing_key(EXAMPLE_SECRET, "20150830", "us-east-1", "iam");
        assert_eq!(
            hex(&hmac_sha256(&key, sts.as_bytes())),
            "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_uri_encode_keeps_unreserved() {
        assert_eq!(uri_encode("amazon.titan-embed-image-v1", true), "amazon.titan-embed-image-v1");
        assert_eq!(
            uri_encode("meta.llama3-70b-instruct-v1:0", true),
            "meta.llama3-70b-instruct-v1%3A0"
        );
    }

    #[test]
    fn test_uri_encode_slash_modes() {
        assert_eq!(uri_encode("blog-output/a b.txt", false), "blog-output/a%20b.txt");
        assert_eq!(uri_encode("a/b", true), "a%2Fb");
    }

    #[test]
    fn test_sign_produces_expected_headers() {
        let credentials = Credentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: EXAMPLE_SECRET.to_string(),
            session_token: None,
        };
        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        let params = SignatureParams {
            method: "POST",
            host: "bedrock-runtime.us-east-1.amazonaws.com",
            canonical_uri: "/model/anthropic.claude-2/invoke",
            query: &[],
            content_type: Some("application/json"),
            payload: b"{}",
            region: "us-east-1",
            service: "bedrock",
            now,
        };

        let headers = sign(&params, &credentials);
        let names: Vec<&str> = headers.iter().map(|(name, _)| name.as_str()).collect();
        assert!(names.contains(&"x-amz-date"));
        assert!(names.contains(&"x-amz-content-sha256"));
        assert!(names.contains(&"authorization"));

        let auth = &headers.iter().find(|(n, _)| n == "authorization").unwrap().1;
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/bedrock/aws4_request"));
        assert!(auth.contains("SignedHeaders=content-type;host;x-amz-content-sha256;x-amz-date"));
    }
}
