// src/config/remote.rs
//! Typed config for the two remote tiers.

use serde::{Deserialize, Serialize};

pub(crate) fn default_timeout_secs() -> u64 {
    10
}

/// Hosted text-generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model_id: String,
    /// "ENV" means: read from MODEL_API_KEY
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            model_id: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Deployed serverless heuristic function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicConfig {
    pub enabled: bool,
    pub function_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            function_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
