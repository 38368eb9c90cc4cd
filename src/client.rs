//! Translation Client
//!
//! One JSON POST per call. A 200 response carrying a non-empty
//! `translated_code` string is reindented and returned; everything else is
//! an error.

use crate::config::Config;
use crate::core::reindent::Reindenter;
use crate::direction::Direction;
use crate::error::{TransError, TransResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Request body sent to the service
#[derive(Debug, Serialize)]
pub struct TranslationRequest<'a> {
    pub code: &'a str,
}

/// Response body expected from the service
#[derive(Debug, Deserialize)]
pub struct TranslationResponse {
    pub translated_code: String,
}

/// Trait for translation backends
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate `code` and return it ready for insertion
    async fn translate(&self, direction: Direction, code: &str) -> TransResult<String>;
}

/// HTTP client for the remote translation service
#[derive(Debug, Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    forward_url: String,
    backward_url: String,
    reindenter: Reindenter,
}

impl TranslationClient {
    /// Create new client from config
    pub fn new(config: &Config) -> TransResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if is_loopback(&config.base_url) {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| TransError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            forward_url: config.endpoint(Direction::JavaToTarget),
            backward_url: config.endpoint(Direction::TargetToJava),
            reindenter: Reindenter::from_config(config),
        })
    }

    pub fn endpoint(&self, direction: Direction) -> &str {
        match direction {
            Direction::JavaToTarget => &self.forward_url,
            Direction::TargetToJava => &self.backward_url,
        }
    }

    /// POST `code` to `endpoint` and return the reindented translation
    pub async fn translate_at(&self, endpoint: &str, code: &str) -> TransResult<String> {
        debug!("📤 Input to API: {}", code);
        debug!("🌐 Using API URL: {}", endpoint);

        let response = self
            .http
            .post(endpoint)
            .json(&TranslationRequest { code })
            .send()
            .await
            .map_err(|e| {
                warn!("❌ Error reaching the API: {}", e);
                TransError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!("📥 Response from API ({}): {}", status, body);

        let raw = parse_response(status, &body)?;
        let formatted = self.reindenter.reindent(&raw);
        debug!("🧹 Code after formatting: {}", formatted);
        Ok(formatted)
    }
}

#[async_trait]
impl TranslationService for TranslationClient {
    async fn translate(&self, direction: Direction, code: &str) -> TransResult<String> {
        info!("🔁 Translating {} ({} bytes)", direction, code.len());
        self.translate_at(self.endpoint(direction), code).await
    }
}

/// Local services are never reached through a proxy
fn is_loopback(base_url: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(base_url) else {
        return false;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<std::net::IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

/// Validate status and shape; the raw body never becomes the result
fn parse_response(status: StatusCode, body: &str) -> TransResult<String> {
    let invalid = || TransError::InvalidResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    };

    if status != StatusCode::OK {
        warn!("❌ Invalid API response ({}): {}", status, body);
        return Err(invalid());
    }

    match serde_json::from_str::<TranslationResponse>(body) {
        Ok(resp) if !resp.translated_code.is_empty() => Ok(resp.translated_code),
        Ok(_) => {
            warn!("❌ Invalid API response: empty translated_code");
            Err(invalid())
        }
        Err(e) => {
            warn!("❌ Invalid API response: {} - Body: {}", e, body);
            Err(invalid())
        }
    }
}
