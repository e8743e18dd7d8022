//! Demo that runs a few messages through the tier chain (local fallback only
//! when the remote tiers are disabled).

use scam_triage::bootstrap::TriageRuntime;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let runtime = TriageRuntime::from_env();

    let samples = [
        "Your electricity connection will be disconnected due to unpaid bill",
        "Complete your KYC today or your bank account will be restricted",
        "Let's meet for lunch tomorrow",
    ];

    for text in samples {
        let verdict = runtime.engine.resolve(text).await;
        println!("[{}]\n{}\n", verdict.source_tier.as_str(), verdict.render());
    }

    println!("triage-demo done");
}
