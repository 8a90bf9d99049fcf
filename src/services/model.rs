//! Client for the external chat-completion collaborator. One opaque call in,
//! one text completion out; bounded retries on rate limits and server errors.

use std::time::Duration;

use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::turn::{Role, Turn};

const MAX_RETRIES: u32 = 2;
const INITIAL_BACKOFF_MS: u64 = 500;

const TEMPERATURE: f64 = 0.8;
const FREQUENCY_PENALTY: f64 = 1.13;

#[derive(Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl ModelClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.model_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.model_api_url.clone(),
            api_key: config.model_api_key.clone(),
            model: config.model_name.clone(),
        })
    }

    /// Sends an ordered message list and returns the single completion text.
    /// Rate-limit and server-side failures are retried a bounded number of
    /// times with backoff; a timed-out request surfaces as `Timeout`.
    pub async fn chat_completion(&self, messages: &[Turn]) -> AppResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "frequency_penalty": FREQUENCY_PENALTY,
        });

        let mut attempt = 0u32;
        loop {
            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err((err, retryable)) if retryable && attempt < MAX_RETRIES => {
                    attempt += 1;
                    let backoff =
                        Duration::from_millis(INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1));
                    tracing::warn!(error = %err, attempt, "Completion call failed, retrying");
                    tokio::time::sleep(backoff).await;
                }
                Err((err, _)) => return Err(err),
            }
        }
    }

    async fn send_once(&self, body: &Value) -> Result<String, (AppError, bool)> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    (AppError::Timeout(format!("completion request: {e}")), false)
                } else {
                    (
                        AppError::ModelCallFailed(format!("completion request failed: {e}")),
                        true,
                    )
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status.as_u16() == 429 || status.is_server_error();
            let detail = response.text().await.unwrap_or_default();
            return Err((
                AppError::ModelCallFailed(format!(
                    "completion service returned {status}: {detail}"
                )),
                retryable,
            ));
        }

        let payload: Value = response.json().await.map_err(|e| {
            (
                AppError::ModelCallFailed(format!("malformed completion response: {e}")),
                false,
            )
        })?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| {
                (
                    AppError::ModelCallFailed("completion response missing message content".into()),
                    false,
                )
            })
    }
}

/// Periodic health-check ping against the completion service, kept out of the
/// request path. The first tick fires immediately, which doubles as a
/// startup warm-up.
pub fn spawn_keepalive_worker(client: ModelClient, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let ping = [Turn::new(Role::User, "hi")];
            match client.chat_completion(&ping).await {
                Ok(_) => tracing::debug!("Completion service keep-alive ok"),
                Err(e) => tracing::warn!(error = %e, "Completion service keep-alive failed"),
            }
        }
    });
}
