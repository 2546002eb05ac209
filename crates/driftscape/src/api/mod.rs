//! Image-generation backends.
//!
//! Two providers are supported: a SwarmUI instance (session handshake plus
//! text-to-image call) and any OpenAI-compatible images API. Both return the
//! generated image as a browser-ready string — a `data:` URI, or a plain
//! URL when that is all the backend offers.
//!
//! Transient failures (rate limits, 5xx, connection errors) are
//! distinguishable from permanent ones so the caller can retry the former;
//! see [`retry`].

pub mod openai;
pub mod retry;
pub mod swarmui;

pub use openai::{OpenAiImageClient, OpenAiImageConfig};
pub use retry::{RetryConfig, is_transient_error};
pub use swarmui::{SwarmUiClient, SwarmUiConfig};

use tracing::warn;

/// The configured image backend.
pub enum ImageProvider {
    SwarmUi(SwarmUiClient),
    OpenAi(OpenAiImageClient),
}

impl ImageProvider {
    /// Short provider identifier for logs and `/version`.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageProvider::SwarmUi(_) => "swarmui",
            ImageProvider::OpenAi(_) => "openai",
        }
    }

    /// The model the provider is configured to use.
    pub fn model(&self) -> &str {
        match self {
            ImageProvider::SwarmUi(client) => &client.config().model,
            ImageProvider::OpenAi(client) => &client.config().model,
        }
    }

    /// The backend base URL.
    pub fn endpoint(&self) -> &str {
        match self {
            ImageProvider::SwarmUi(client) => &client.config().base_url,
            ImageProvider::OpenAi(client) => &client.config().base_url,
        }
    }

    /// Generate one image for a prompt. Returns a browser-ready image
    /// string (`data:` URI or URL).
    pub async fn generate(&self, prompt: &str) -> Result<String, String> {
        match self {
            ImageProvider::SwarmUi(client) => client.generate(prompt).await,
            ImageProvider::OpenAi(client) => client.generate(prompt).await,
        }
    }

    /// [`generate`](Self::generate) with bounded retry on transient errors.
    pub async fn generate_with_retry(
        &self,
        prompt: &str,
        retry: &RetryConfig,
    ) -> Result<String, String> {
        let mut attempt = 0;
        loop {
            match self.generate(prompt).await {
                Ok(image) => return Ok(image),
                Err(err) if attempt < retry.max_retries && is_transient_error(&err) => {
                    let delay = retry.delay_for_attempt(attempt);
                    warn!(
                        "transient generation failure (attempt {}): {err} — retrying in {delay:?}",
                        attempt + 1
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

// ── Payload helpers ────────────────────────────────────────────────

/// Prepend `http://` when a configured base URL carries no scheme, so
/// request building never fails on bare host:port values.
pub(crate) fn ensure_scheme(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Normalize a backend image payload to a browser-ready `data:` URI.
///
/// Backends variously return full data URIs or raw base64; raw payloads are
/// wrapped, existing URIs pass through untouched.
pub(crate) fn data_uri_from_payload(payload: &str) -> String {
    if payload.starts_with("data:") {
        payload.to_string()
    } else if let Some((_, b64)) = payload.split_once(',') {
        format!("data:image/png;base64,{b64}")
    } else {
        format!("data:image/png;base64,{payload}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_scheme_adds_http() {
        assert_eq!(ensure_scheme("10.0.1.25:7801"), "http://10.0.1.25:7801");
        assert_eq!(ensure_scheme("http://host:1/"), "http://host:1");
        assert_eq!(ensure_scheme("https://host"), "https://host");
    }

    #[test]
    fn data_uri_passthrough_and_wrapping() {
        assert_eq!(
            data_uri_from_payload("data:image/jpeg;base64,AAAA"),
            "data:image/jpeg;base64,AAAA"
        );
        assert_eq!(
            data_uri_from_payload("image/png;base64,BBBB"),
            "data:image/png;base64,BBBB"
        );
        assert_eq!(
            data_uri_from_payload("CCCC"),
            "data:image/png;base64,CCCC"
        );
    }

    #[test]
    fn provider_kind_and_model() {
        let provider = ImageProvider::SwarmUi(
            SwarmUiClient::new(SwarmUiConfig::default()).unwrap(),
        );
        assert_eq!(provider.kind(), "swarmui");
        assert!(!provider.model().is_empty());
        assert!(provider.endpoint().starts_with("http://"));
    }
}
