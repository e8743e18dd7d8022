//! Remote heuristic adapter: named serverless function behind a client trait.
//!
//! The function receives `{"text": ...}` and answers with an envelope whose
//! `body` field is itself a JSON-encoded string holding `{verdict, reason?}`.
//! A missing `verdict` is a parse failure (fall through), never a SAFE
//! result, and schema mismatches are parse failures rather than guessed-at
//! alternate shapes.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::remote::HeuristicConfig;
use crate::errors::AdapterError;

/// Reason text used when the function answers without one.
pub const DEFAULT_REASON: &str = "No details provided.";

/// Trait object used by the dispatcher (and mocked in tests).
#[async_trait]
pub trait HeuristicClient: Send + Sync {
    /// Run the heuristic on `text`; returns the composed verdict string.
    async fn invoke_heuristic(&self, text: &str) -> Result<String, AdapterError>;
    /// Function name for diagnostics/headers.
    fn function_name(&self) -> &'static str;
}

#[derive(Serialize)]
struct FunctionPayload<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct FunctionEnvelope {
    #[serde(rename = "statusCode")]
    #[allow(dead_code)]
    status_code: Option<u16>,
    body: String,
}

#[derive(Deserialize)]
struct HeuristicBody {
    verdict: Option<String>,
    reason: Option<String>,
}

/// Decode the function envelope and compose `"{verdict}\nAnalysis: {reason}"`.
pub fn parse_envelope(raw: &str) -> Result<String, AdapterError> {
    let envelope: FunctionEnvelope = serde_json::from_str(raw)?;
    let body: HeuristicBody = serde_json::from_str(&envelope.body)?;
    let verdict = body
        .verdict
        .ok_or_else(|| AdapterError::parse("heuristic body carried no verdict field"))?;
    let reason = body.reason.unwrap_or_else(|| DEFAULT_REASON.to_string());
    Ok(format!("{verdict}\nAnalysis: {reason}"))
}

/// Client for the deployed heuristic function.
pub struct FunctionProvider {
    http: reqwest::Client,
    function_url: String,
}

impl FunctionProvider {
    pub fn new(cfg: &HeuristicConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("scam-triage/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .expect("reqwest client");
        Self {
            http,
            function_url: cfg.function_url.clone(),
        }
    }
}

#[async_trait]
impl HeuristicClient for FunctionProvider {
    async fn invoke_heuristic(&self, text: &str) -> Result<String, AdapterError> {
        // Synchronous invocation semantics: wait for the full response.
        let resp = self
            .http
            .post(&self.function_url)
            .json(&FunctionPayload { text })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AdapterError::transport(format!(
                "heuristic function returned status {status}"
            )));
        }

        let raw = resp.text().await?;
        parse_envelope(&raw)
    }

    fn function_name(&self) -> &'static str {
        "scam-heuristic"
    }
}

/// Always fails, so the dispatcher advances to the local tier.
pub struct UnconfiguredHeuristic;

#[async_trait]
impl HeuristicClient for UnconfiguredHeuristic {
    async fn invoke_heuristic(&self, _text: &str) -> Result<String, AdapterError> {
        Err(AdapterError::auth("heuristic tier disabled"))
    }
    fn function_name(&self) -> &'static str {
        "disabled"
    }
}
