// src/config/mod.rs
//! Service configuration loaded from `config/triage.json`.
//!
//! Credentials use env indirection: an `api_key` of "ENV" is resolved from
//! the process environment at load time, so no secret lives in the file. A missing or
//! unreadable config file degrades to defaults (remote tiers disabled) so the
//! local fallback still serves.

pub mod remote;

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use remote::{HeuristicConfig, ModelConfig};

pub const DEFAULT_TRIAGE_CONFIG_PATH: &str = "config/triage.json";
pub const ENV_TRIAGE_CONFIG_PATH: &str = "TRIAGE_CONFIG_PATH";
pub const ENV_MODEL_API_KEY: &str = "MODEL_API_KEY";

fn default_db_path() -> String {
    crate::classifier::DEFAULT_SCAM_DB_PATH.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub heuristic: HeuristicConfig,
    #[serde(default = "default_db_path")]
    pub scam_db_path: String,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            heuristic: HeuristicConfig::default(),
            scam_db_path: default_db_path(),
        }
    }
}

impl TriageConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: TriageConfig = serde_json::from_str(&data)?;

        // Resolve api key if "ENV". A missing variable degrades the model
        // tier (per-call auth failure → fall through) instead of refusing to
        // start; the local tier must keep serving.
        if cfg.model.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.model.api_key = match env::var(ENV_MODEL_API_KEY) {
                Ok(key) => key,
                Err(_) => {
                    warn!("{ENV_MODEL_API_KEY} not set; model tier will fall through");
                    String::new()
                }
            };
        }

        Ok(cfg)
    }

    /// Resolve the config path from env/default and load it, falling back to
    /// `TriageConfig::default()` when reading or parsing fails.
    pub fn load_or_default() -> Self {
        let path = env::var(ENV_TRIAGE_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TRIAGE_CONFIG_PATH));
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "triage config unavailable; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let cfg: TriageConfig = serde_json::from_str("{}").unwrap();
        assert!(!cfg.model.enabled);
        assert!(!cfg.heuristic.enabled);
        assert_eq!(cfg.scam_db_path, crate::classifier::DEFAULT_SCAM_DB_PATH);
        assert_eq!(cfg.model.timeout_secs, 10);
    }

    #[test]
    fn full_json_round_trips() {
        let raw = r#"{
            "model": {
                "enabled": true,
                "endpoint": "https://models.example.com",
                "model_id": "titan-text-express-v1",
                "api_key": "literal-key",
                "timeout_secs": 6
            },
            "heuristic": {
                "enabled": true,
                "function_url": "https://functions.example.com/scam-heuristic",
                "timeout_secs": 8
            },
            "scam_db_path": "data/db.json"
        }"#;
        let cfg: TriageConfig = serde_json::from_str(raw).unwrap();
        assert!(cfg.model.enabled);
        assert_eq!(cfg.model.model_id, "titan-text-express-v1");
        assert_eq!(cfg.heuristic.timeout_secs, 8);
        assert_eq!(cfg.scam_db_path, "data/db.json");
    }
}
