//! Scam Triage Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scam_triage::api::{self, AppState};
use scam_triage::bootstrap::TriageRuntime;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - TRIAGE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("TRIAGE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scam_triage=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> shuttle_axum::ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This enables
    // TRIAGE_CONFIG_PATH / SCAM_DB_PATH / MODEL_API_KEY from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    // --- Build the tier chain once and share it across requests ---
    let runtime = TriageRuntime::from_env();
    runtime.quick_probe().await;

    let state = AppState::new(runtime.engine);
    let router = api::router(state);

    Ok(router.into())
}
