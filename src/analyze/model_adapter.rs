//! Remote model adapter: hosted text-generation endpoint behind a client trait.
//!
//! The adapter formats a fixed classification prompt, POSTs it with a bounded,
//! low-temperature generation config, and returns the first generated result
//! as the verdict string. Any transport, auth, or decode failure is a typed
//! error for the dispatcher; nothing is partially returned and nothing is
//! retried here.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::remote::ModelConfig;
use crate::errors::AdapterError;

/// Instruction template embedding the message under analysis.
pub fn build_prompt(text: &str) -> String {
    format!(
        "You are a security AI. Analyze this message for social engineering scams. \
         If it is a scam, output DANGEROUS and explain why in English and Hindi. \
         If it is harmless, output SAFE. Message: {text}"
    )
}

/// Trait object used by the dispatcher (and mocked in tests).
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Classify `text`; the returned string is the raw model verdict output.
    async fn invoke_model(&self, text: &str) -> Result<String, AdapterError>;
    /// Provider name for diagnostics/headers.
    fn provider_name(&self) -> &'static str;
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxTokenCount")]
    max_token_count: u32,
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
}

#[derive(Serialize)]
struct GenerationRequest {
    #[serde(rename = "inputText")]
    input_text: String,
    #[serde(rename = "textGenerationConfig")]
    text_generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Deserialize)]
struct GenerationResult {
    #[serde(rename = "outputText")]
    output_text: String,
}

/// Pull the first generated result out of a raw response body.
pub fn first_output(raw: &str) -> Result<String, AdapterError> {
    let body: GenerationResponse = serde_json::from_str(raw)?;
    let first = body
        .results
        .into_iter()
        .next()
        .ok_or_else(|| AdapterError::parse("generation response carried no results"))?;
    let out = first.output_text.trim().to_string();
    if out.is_empty() {
        return Err(AdapterError::parse("generated result was empty"));
    }
    Ok(out)
}

/// Client for the hosted text-generation endpoint.
pub struct TextModelProvider {
    http: reqwest::Client,
    endpoint: String,
    model_id: String,
    api_key: String,
}

impl TextModelProvider {
    pub fn new(cfg: &ModelConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("scam-triage/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .expect("reqwest client");
        Self {
            http,
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            model_id: cfg.model_id.clone(),
            api_key: cfg.api_key.clone(),
        }
    }
}

#[async_trait]
impl ModelClient for TextModelProvider {
    async fn invoke_model(&self, text: &str) -> Result<String, AdapterError> {
        if self.api_key.is_empty() {
            return Err(AdapterError::auth("model api key is not configured"));
        }

        let req = GenerationRequest {
            input_text: build_prompt(text),
            text_generation_config: GenerationConfig {
                max_token_count: 512,
                temperature: 0.1,
                top_p: 0.9,
            },
        };

        let url = format!("{}/model/{}/invoke", self.endpoint, self.model_id);
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AdapterError::transport(format!(
                "model endpoint returned status {status}"
            )));
        }

        let raw = resp.text().await?;
        first_output(&raw)
    }

    fn provider_name(&self) -> &'static str {
        "text-generation"
    }
}

/// Always fails with an auth error; used when the model tier is disabled or
/// unconfigured, so the dispatcher falls straight through.
pub struct UnconfiguredModel;

#[async_trait]
impl ModelClient for UnconfiguredModel {
    async fn invoke_model(&self, _text: &str) -> Result<String, AdapterError> {
        Err(AdapterError::auth("model tier disabled"))
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic client for tests/local runs (`TRIAGE_TEST_MODE=mock`).
#[derive(Clone)]
pub struct MockModel {
    pub fixed: String,
}

#[async_trait]
impl ModelClient for MockModel {
    async fn invoke_model(&self, _text: &str) -> Result<String, AdapterError> {
        Ok(self.fixed.clone())
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
