// src/bootstrap.rs
//! Builds the triage engine from config once at process start.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analyze::{
    FunctionProvider, HeuristicClient, MockModel, ModelClient, TextModelProvider,
    UnconfiguredHeuristic, UnconfiguredModel,
};
use crate::classifier::{LocalClassifier, SubstringMatch};
use crate::config::TriageConfig;
use crate::triage::TriageEngine;

/// Factory: build the model client according to config and environment.
///
/// * If `TRIAGE_TEST_MODE=mock`, returns a deterministic mock client.
/// * Else if the tier is disabled or has no endpoint, returns a client that
///   always fails, so the dispatcher falls through.
pub fn build_model_client(cfg: &TriageConfig) -> Arc<dyn ModelClient> {
    if std::env::var("TRIAGE_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockModel {
            fixed: "SAFE\nNothing suspicious here (mock).".to_string(),
        });
    }

    if !cfg.model.enabled || cfg.model.endpoint.is_empty() {
        return Arc::new(UnconfiguredModel);
    }
    Arc::new(TextModelProvider::new(&cfg.model))
}

pub fn build_heuristic_client(cfg: &TriageConfig) -> Arc<dyn HeuristicClient> {
    if !cfg.heuristic.enabled || cfg.heuristic.function_url.is_empty() {
        return Arc::new(UnconfiguredHeuristic);
    }
    Arc::new(FunctionProvider::new(&cfg.heuristic))
}

pub fn build_engine(cfg: &TriageConfig) -> TriageEngine {
    let db_path = std::env::var(crate::classifier::ENV_SCAM_DB_PATH)
        .unwrap_or_else(|_| cfg.scam_db_path.clone());
    let local = LocalClassifier::new(db_path, Box::new(SubstringMatch));
    TriageEngine::new(build_model_client(cfg), build_heuristic_client(cfg), local)
}

pub struct TriageRuntime {
    pub cfg: TriageConfig,
    pub engine: Arc<TriageEngine>,
}

impl TriageRuntime {
    pub fn from_env() -> Self {
        let cfg = TriageConfig::load_or_default();
        // Safe diagnostics: never the key itself, only its length.
        info!(
            "triage cfg loaded: model_enabled={}, heuristic_enabled={}, key_len={}, db={}",
            cfg.model.enabled,
            cfg.heuristic.enabled,
            cfg.model.api_key.len(),
            cfg.scam_db_path
        );
        let engine = Arc::new(build_engine(&cfg));
        Self { cfg, engine }
    }

    /// One-off smoke test of the tier chain at startup. Never panics; logs
    /// which tier answered.
    pub async fn quick_probe(&self) {
        if !self.cfg.model.enabled && !self.cfg.heuristic.enabled {
            warn!("triage quick_probe skipped: no remote tier enabled in config");
            return;
        }
        let sample = "Your bank account will be restricted today, complete KYC immediately.";
        let verdict = self.engine.resolve(sample).await;
        info!(
            tier = verdict.source_tier.as_str(),
            label = verdict.label.marker(),
            "triage quick_probe finished"
        );
    }
}
