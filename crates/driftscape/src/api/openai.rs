//! Async HTTP client for an OpenAI-compatible images API.
//!
//! Speaks `POST {base}/images/generations` with bearer auth. Responses may
//! carry the image inline (`b64_json`) or as a temporary URL; URL responses
//! are fetched and re-encoded so viewers always get a stable payload, with
//! the bare URL passed through as a fallback when the fetch fails.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::{debug, warn};

use super::ensure_scheme;

/// Configuration for an OpenAI-compatible images backend.
#[derive(Debug, Clone)]
pub struct OpenAiImageConfig {
    /// API base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Image model, e.g. `dall-e-3`.
    pub model: String,
    /// Requested size, e.g. `1024x1024`.
    pub size: String,
    /// Timeout for the generation call.
    pub timeout: Duration,
}

impl Default for OpenAiImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ImagesResponse {
    data: Option<Vec<ImageDatum>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct ImageDatum {
    b64_json: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

/// Client for one OpenAI-compatible images endpoint.
#[derive(Debug)]
pub struct OpenAiImageClient {
    config: OpenAiImageConfig,
    client: reqwest::Client,
}

impl OpenAiImageClient {
    pub fn new(mut config: OpenAiImageConfig) -> Result<Self, String> {
        config.base_url = ensure_scheme(&config.base_url);
        if config.api_key.is_empty() {
            return Err("OpenAI image provider requires an API key".to_string());
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OpenAiImageConfig {
        &self.config
    }

    /// Generate one image and return it as a `data:` URI (or a URL when the
    /// backend only offers one and the fetch fails).
    pub async fn generate(&self, prompt: &str) -> Result<String, String> {
        let url = format!("{}/images/generations", self.config.base_url);
        debug!("OpenAI images request: {url} model={}", self.config.model);

        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "size": self.config.size,
        });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;
        if !status.is_success() {
            return Err(format!("OpenAI images API HTTP {status}: {text}"));
        }

        let parsed: ImagesResponse = serde_json::from_str(&text)
            .map_err(|e| format!("failed to parse images response: {e}"))?;
        if let Some(err) = parsed.error {
            return Err(format!("OpenAI images API error: {}", err.message));
        }

        let first = parsed
            .data
            .and_then(|data| data.into_iter().next())
            .ok_or_else(|| "OpenAI returned no images".to_string())?;

        if let Some(b64) = first.b64_json {
            return Ok(format!("data:image/png;base64,{b64}"));
        }
        if let Some(image_url) = first.url {
            return Ok(self.inline_remote_image(&image_url).await);
        }
        Err("OpenAI response had neither b64_json nor url".to_string())
    }

    /// Fetch a temporary image URL and inline it as a `data:` URI. Falls
    /// back to the URL itself — those links expire, but a short-lived image
    /// beats none.
    async fn inline_remote_image(&self, image_url: &str) -> String {
        match self.fetch_bytes(image_url).await {
            Ok(bytes) => format!("data:image/png;base64,{}", BASE64.encode(bytes)),
            Err(err) => {
                warn!("failed to inline generated image from {image_url}: {err}");
                image_url.to_string()
            }
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;
        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }
        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| format!("failed to read image bytes: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_rejected() {
        let err = OpenAiImageClient::new(OpenAiImageConfig::default()).unwrap_err();
        assert!(err.contains("API key"));
    }

    #[test]
    fn key_is_sufficient_to_build() {
        let client = OpenAiImageClient::new(OpenAiImageConfig {
            api_key: "sk-test".to_string(),
            ..OpenAiImageConfig::default()
        })
        .unwrap();
        assert_eq!(client.config().model, "dall-e-3");
    }

    #[tokio::test]
    async fn generate_against_dead_backend_errors() {
        let client = OpenAiImageClient::new(OpenAiImageConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "sk-test".to_string(),
            ..OpenAiImageConfig::default()
        })
        .unwrap();
        let err = client.generate("a test prompt").await.unwrap_err();
        assert!(err.contains("request failed"), "unexpected error: {err}");
    }
}
