use async_trait::async_trait;
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{backoff_delay_ms, truncate_for_log, Provider};

/// Reasoning models wrap their deliberation in think tags before the answer
static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<think>.*?</think>").expect("static regex is valid")
});

/// Ollama client for interacting with the Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Generate request for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    /// How long to keep the model loaded in memory
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_alive: Option<String>,
}

/// Generation options for the Ollama API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
            keep_alive: None,
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens
    pub fn max_tokens(mut self, num_predict: u32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).num_predict = Some(num_predict);
        self
    }

    /// Set the keep-alive duration
    pub fn keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    /// The prompt text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new_with_config(url, 3, 1000, 120)
    }

    /// Create a new Ollama client with retry and timeout configuration
    ///
    /// Ollama speaks HTTP/1.1; connections are kept alive between segments.
    pub fn new_with_config(
        url: impl Into<String>,
        max_retries: u32,
        backoff_base_ms: u64,
        timeout_secs: u64,
    ) -> Self {
        let base_url = url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
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

    /// Generate text from the Ollama API with retry logic
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.client.post(&url).json(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Ollama response: {}", e)))?;

                    if status.is_success() {
                        return parse_generation(&body);
                    } else if status.is_server_error() {
                        error!(
                            "Ollama API error ({}): {} - attempt {}/{}",
                            status,
                            truncate_for_log(&body, 200),
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message: body,
                        });
                    } else {
                        // Client errors are not retried
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message: body,
                        });
                    }
                }
                Err(e) => {
                    warn!("Ollama network error: {} - attempt {}/{}", e, attempt + 1, self.max_retries + 1);
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                tokio::time::sleep(Duration::from_millis(backoff_delay_ms(self.backoff_base_ms, attempt))).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!("Ollama request failed after {} attempts", self.max_retries + 1))
        }))
    }

    /// Get the Ollama API version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        response["version"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::ParseError("Invalid version format in response".to_string()))
    }
}

/// Parse a generate response, accepting a JSONL stream when the server ignored `stream: false`
fn parse_generation(body: &str) -> Result<GenerationResponse, ProviderError> {
    if let Ok(response) = serde_json::from_str::<GenerationResponse>(body) {
        return Ok(response);
    }

    debug!("Ollama response is not a single object, trying JSONL: {}", truncate_for_log(body, 200));
    let mut text = String::new();
    let mut model = String::new();
    let mut parsed_any = false;
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let value: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| ProviderError::ParseError(format!("Invalid JSON from Ollama: {}", e)))?;
        if let Some(part) = value.get("response").and_then(|v| v.as_str()) {
            text.push_str(part);
        }
        if let Some(name) = value.get("model").and_then(|v| v.as_str()) {
            model = name.to_string();
        }
        parsed_any = true;
    }

    if !parsed_any {
        return Err(ProviderError::ParseError("Empty response from Ollama".to_string()));
    }

    Ok(GenerationResponse {
        model,
        response: text,
        done: true,
        prompt_eval_count: None,
        eval_count: None,
    })
}

/// Remove reasoning blocks and surrounding whitespace from generated text
pub fn clean_generated_text(text: &str) -> String {
    THINK_BLOCK.replace_all(text, "").trim().to_string()
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(&request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.version().await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> Vec<String> {
        vec![clean_generated_text(&response.response)]
    }
}
