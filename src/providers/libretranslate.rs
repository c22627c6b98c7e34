/*!
 * LibreTranslate client.
 *
 * LibreTranslate serves pretrained OPUS-MT/Argos models over HTTP and accepts
 * a whole batch of segments in one `POST /translate` call, which is what the
 * backend adapter wants. An API key is only needed for public instances.
 */

use async_trait::async_trait;
use log::{error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{backoff_delay_ms, truncate_for_log, Provider};

/// LibreTranslate client
#[derive(Debug)]
pub struct LibreTranslate {
    /// Base URL of the server
    base_url: String,
    /// Optional API key
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Batch translation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibreTranslateRequest {
    /// Segments to translate
    pub q: Vec<String>,
    /// ISO 639-1 source code
    pub source: String,
    /// ISO 639-1 target code
    pub target: String,
    /// Input format, always plain text here
    pub format: String,
    /// API key, when the server requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl LibreTranslateRequest {
    /// Create a plain-text batch request
    pub fn new(segments: Vec<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: segments,
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
            api_key: None,
        }
    }
}

/// Batch translation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibreTranslateResponse {
    /// One translation per input segment
    #[serde(rename = "translatedText")]
    pub translated_text: Vec<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct LibreTranslateErrorBody {
    error: String,
}

impl LibreTranslate {
    /// Create a client with retry and timeout configuration
    pub fn new_with_config(
        url: impl Into<String>,
        api_key: impl Into<String>,
        max_retries: u32,
        backoff_base_ms: u64,
        timeout_secs: u64,
    ) -> Self {
        let api_key = api_key.into();
        Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            api_key: if api_key.is_empty() { None } else { Some(api_key) },
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate a batch, retrying on transport and server errors
    pub async fn translate(&self, mut request: LibreTranslateRequest) -> Result<LibreTranslateResponse, ProviderError> {
        if request.api_key.is_none() {
            request.api_key = self.api_key.clone();
        }

        let url = format!("{}/translate", self.base_url);
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.client.post(&url).json(&request).send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.map_err(|e| {
                        ProviderError::RequestFailed(format!("Failed to read LibreTranslate response: {}", e))
                    })?;

                    if status.is_success() {
                        return parse_response(&body);
                    }

                    let message = error_message(&body);
                    if status.is_server_error() {
                        error!(
                            "LibreTranslate error ({}): {} - attempt {}/{}",
                            status,
                            message,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    } else {
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    warn!(
                        "LibreTranslate network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                tokio::time::sleep(Duration::from_millis(backoff_delay_ms(self.backoff_base_ms, attempt))).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "LibreTranslate request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }

    /// List the language codes the server can translate from
    pub async fn languages(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/languages", self.base_url);
        let response: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let codes = response
            .as_array()
            .ok_or_else(|| ProviderError::ParseError("Expected a list of languages".to_string()))?
            .iter()
            .filter_map(|lang| lang.get("code").and_then(|c| c.as_str()).map(str::to_string))
            .collect();
        Ok(codes)
    }
}

fn parse_response(body: &str) -> Result<LibreTranslateResponse, ProviderError> {
    serde_json::from_str::<LibreTranslateResponse>(body).map_err(|e| {
        ProviderError::ParseError(format!(
            "Unexpected LibreTranslate response ({}): {}",
            e,
            truncate_for_log(body, 200)
        ))
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<LibreTranslateErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| truncate_for_log(body, 200))
}

#[async_trait]
impl Provider for LibreTranslate {
    type Request = LibreTranslateRequest;
    type Response = LibreTranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.translate(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let codes = self.languages().await?;
        if codes.iter().any(|c| c == "es") {
            Ok(())
        } else {
            Err(ProviderError::RequestFailed("Server has no Spanish model loaded".to_string()))
        }
    }

    fn extract_text(response: &Self::Response) -> Vec<String> {
        response.translated_text.clone()
    }
}
