// src/analyze/mod.rs
//! Remote analysis adapters for the triage pipeline.

pub mod heuristic_adapter;
pub mod model_adapter;

// Re-export convenient types.
pub use heuristic_adapter::{FunctionProvider, HeuristicClient, UnconfiguredHeuristic};
pub use model_adapter::{MockModel, ModelClient, TextModelProvider, UnconfiguredModel};
