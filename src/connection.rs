//! HTTP connection to the card-search API.
//!
//! Owns the HTTP client and the shared [`RateLimiter`]. Non-success
//! responses are decoded into the API's error object when possible.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config;
use crate::error::{DeckBuilderError, Result};
use crate::models::ApiErrorBody;
use crate::rate_limiter::RateLimiter;

/// Wraps an HTTP client, the API base URL, and the injected rate limiter.
#[derive(Debug, Clone)]
pub struct Connection {
    client: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl Connection {
    /// Create a connection to `base_url` that admits requests through `limiter`.
    pub fn new(base_url: &str, timeout: Duration, limiter: Arc<RateLimiter>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared limiter.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// GET `path` with query parameters and decode the JSON body.
    ///
    /// Does not consult the rate limiter; see
    /// [`get_json_throttled`](Self::get_json_throttled).
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, params);

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let bytes = resp.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let bytes = resp.bytes().await.unwrap_or_default();
        match serde_json::from_slice::<ApiErrorBody>(&bytes) {
            Ok(body) => Err(DeckBuilderError::Api {
                status: body.status,
                code: body.code,
                details: body.details,
            }),
            Err(_) => Err(DeckBuilderError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }

    /// Wait for the rate limiter, then [`get_json`](Self::get_json).
    pub async fn get_json_throttled<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.limiter.throttle().await;
        self.get_json(path, params).await
    }
}
