//! Application entrypoint and state wiring.

use std::sync::{Arc, RwLock};

use provchain_node::config::Config;
use provchain_node::ledger::Ledger;
use provchain_node::routes::{build_router, AppState};
use provchain_node::storage;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "provchain_node=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1) config + dirs
    let config = Config::from_env();
    storage::ensure_dir(&config.upload_dir).expect("create upload dir");

    // 2) the chain: genesis is sealed here, once per process
    let ledger = Ledger::new();
    tracing::info!(genesis_hash = %ledger.tip().hash, "ledger initialized");

    // 3) shared state + router
    let state = AppState {
        ledger: Arc::new(RwLock::new(ledger)),
        upload_dir: config.upload_dir.clone(),
    };
    let app = build_router(state, &config.static_dir);

    // 4) serve
    tracing::info!(
        addr = %config.bind_addr,
        upload_dir = %config.upload_dir.display(),
        "listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("bind listener");
    axum::serve(listener, app).await.expect("server error");
}
