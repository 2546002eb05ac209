//! Async HTTP client for a SwarmUI text-to-image backend.
//!
//! SwarmUI wants a two-step dance: `GetNewSession` for a session id, then
//! `GenerateText2Image` with the prompt and generation parameters. The
//! response carries images either as raw base64 or full data URIs.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use super::{data_uri_from_payload, ensure_scheme};

/// Timeout for the lightweight session handshake.
const SESSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a SwarmUI backend.
#[derive(Debug, Clone)]
pub struct SwarmUiConfig {
    /// API base URL; a missing scheme gets `http://` prepended.
    pub base_url: String,
    /// Model name, e.g. `Flux/flux1-schnell-fp8`.
    pub model: String,
    pub width: u32,
    pub height: u32,
    pub cfg_scale: f64,
    pub steps: u32,
    /// Generation seed; -1 lets the backend pick.
    pub seed: i64,
    /// Timeout for the generation call itself.
    pub timeout: Duration,
}

impl Default for SwarmUiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7801".to_string(),
            model: "Flux/flux1-schnell-fp8".to_string(),
            width: 1280,
            height: 720,
            cfg_scale: 1.0,
            steps: 6,
            seed: -1,
            timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Deserialize, Debug)]
struct NewSessionResponse {
    session_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    images: Option<Vec<String>>,
    error: Option<String>,
}

/// Client for one SwarmUI instance.
pub struct SwarmUiClient {
    config: SwarmUiConfig,
    client: reqwest::Client,
}

impl SwarmUiClient {
    pub fn new(mut config: SwarmUiConfig) -> Result<Self, String> {
        config.base_url = ensure_scheme(&config.base_url);
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SwarmUiConfig {
        &self.config
    }

    /// Obtain a fresh session id from the backend.
    async fn new_session(&self) -> Result<String, String> {
        let url = format!("{}/API/GetNewSession", self.config.base_url);
        let resp = self
            .client
            .post(&url)
            .timeout(SESSION_TIMEOUT)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("SwarmUI GetNewSession HTTP {status}"));
        }

        let parsed: NewSessionResponse = resp
            .json()
            .await
            .map_err(|e| format!("failed to parse session response: {e}"))?;
        parsed
            .session_id
            .ok_or_else(|| "SwarmUI returned no session id".to_string())
    }

    /// Generate one image and return it as a `data:` URI.
    pub async fn generate(&self, prompt: &str) -> Result<String, String> {
        debug!(
            "SwarmUI request: {} model={}",
            self.config.base_url, self.config.model
        );
        let session_id = self.new_session().await?;

        let params = serde_json::json!({
            "model": self.config.model,
            "width": self.config.width,
            "height": self.config.height,
            "cfgscale": self.config.cfg_scale,
            "steps": self.config.steps,
            "seed": self.config.seed,
        });
        let mut body = serde_json::json!({
            "session_id": session_id,
            "images": "1",
            "prompt": prompt,
            "donotsave": true,
        });
        if let (Some(body_map), Some(param_map)) = (body.as_object_mut(), params.as_object()) {
            for (key, value) in param_map {
                body_map.insert(key.clone(), value.clone());
            }
        }

        let start = Instant::now();
        let url = format!("{}/API/GenerateText2Image", self.config.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("SwarmUI GenerateText2Image HTTP {status}"));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| format!("failed to parse generation response: {e}"))?;
        if let Some(err) = parsed.error {
            return Err(format!("SwarmUI error: {err}"));
        }

        let image = parsed
            .images
            .and_then(|images| images.into_iter().next())
            .ok_or_else(|| "SwarmUI returned no images".to_string())?;
        debug!(
            "SwarmUI generated image in {:.1}s ({} bytes encoded)",
            start.elapsed().as_secs_f64(),
            image.len()
        );

        Ok(data_uri_from_payload(&image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_base_url() {
        let client = SwarmUiClient::new(SwarmUiConfig {
            base_url: "10.0.1.25:7801/".to_string(),
            ..SwarmUiConfig::default()
        })
        .unwrap();
        assert_eq!(client.config().base_url, "http://10.0.1.25:7801");
    }

    #[test]
    fn default_config_matches_backend_defaults() {
        let config = SwarmUiConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.steps, 6);
        assert_eq!(config.seed, -1);
    }

    #[tokio::test]
    async fn generate_against_dead_backend_errors() {
        let client = SwarmUiClient::new(SwarmUiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..SwarmUiConfig::default()
        })
        .unwrap();
        let err = client.generate("a test prompt").await.unwrap_err();
        assert!(err.contains("request failed"), "unexpected error: {err}");
    }
}
