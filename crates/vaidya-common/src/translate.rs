/// HTTP client for a LibreTranslate-compatible machine-translation service.
///
/// Errors are returned to the caller here; the "never fail, fall back to the source text"
/// policy lives in the server's translation adapter.
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CommonError;

#[derive(Clone, Debug)]
pub struct TranslateClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub max_error_body_bytes: usize,
}

impl TranslateClientConfig {
    /// Returns `None` when `TRANSLATE_BASE_URL` is unset, which disables translation.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("TRANSLATE_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())?;

        let api_key = std::env::var("TRANSLATE_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let timeout = std::env::var("TRANSLATE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        let max_retries = std::env::var("TRANSLATE_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let initial_backoff = std::env::var("TRANSLATE_RETRY_INITIAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(200));

        let max_backoff = std::env::var("TRANSLATE_RETRY_MAX_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(2_000));

        Some(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key,
            timeout,
            max_retries,
            initial_backoff,
            max_backoff,
            max_error_body_bytes: 4 * 1024,
        })
    }
}

#[derive(Clone)]
pub struct TranslateClient {
    config: TranslateClientConfig,
    http: reqwest::Client,
}

impl TranslateClient {
    pub fn new(config: TranslateClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("vaidya/translate")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &TranslateClientConfig {
        &self.config
    }

    /// Translate `text` from `source` to `target` (ISO 639-1 codes such as "en", "hi").
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, CommonError> {
        let url = format!("{}/translate", self.config.base_url);
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };
        let (url, body) = (&url, &body);

        self.request_with_retry(|| async move {
            let resp = self
                .http
                .post(url)
                .timeout(self.config.timeout)
                .json(body)
                .send()
                .await?;

            if !resp.status().is_success() {
                return Err(to_upstream_error(resp, self.config.max_error_body_bytes).await);
            }

            let parsed: TranslateResponse = serde_json::from_slice(&resp.bytes().await?)?;
            if parsed.translated_text.trim().is_empty() {
                return Err(CommonError::EmptyTranslation);
            }
            Ok(parsed.translated_text)
        })
        .await
    }

    async fn request_with_retry<T, Fut, F>(&self, mut f: F) -> Result<T, CommonError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, CommonError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    if attempt > self.config.max_retries || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = backoff_delay(
                        self.config.initial_backoff,
                        self.config.max_backoff,
                        attempt - 1,
                    );
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "translation request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

async fn to_upstream_error(resp: reqwest::Response, max_error_body_bytes: usize) -> CommonError {
    let status = resp.status();
    let body = read_limited_text(resp, max_error_body_bytes).await;
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|env| env.error)
        .unwrap_or(body);
    CommonError::Upstream { status, message }
}

fn should_retry(err: &CommonError) -> bool {
    match err {
        CommonError::Request(e) => e.is_timeout() || e.is_connect(),
        CommonError::Upstream { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        CommonError::InvalidJson(_) | CommonError::EmptyTranslation => false,
    }
}

fn backoff_delay(initial: Duration, max: Duration, exponent: u32) -> Duration {
    let mult = 1u128.checked_shl(exponent).unwrap_or(u128::MAX);
    let base_ms = initial.as_millis().saturating_mul(mult);
    let capped_ms = std::cmp::min(base_ms, max.as_millis()) as u64;
    let jitter_cap = std::cmp::max(1, capped_ms / 4);
    Duration::from_millis(capped_ms.saturating_add(pseudo_jitter_ms(jitter_cap)))
}

fn pseudo_jitter_ms(max_inclusive: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0));
    (now.subsec_nanos() as u64) % (max_inclusive + 1)
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read translation error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}
