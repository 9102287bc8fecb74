//! HTTP surface: upload an artifact, query the chain, check its integrity.

use std::path::{Path as FsPath, PathBuf};
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::crypto::hash_bytes;
use crate::ledger::Ledger;
use crate::model::Block;
use crate::storage;

/// Shared application state passed to Axum handlers.
///
/// `append` runs under the write lock so the read-tip/push-successor step is
/// atomic; snapshots and validation share the read lock.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub upload_dir: PathBuf,
}

/// Assemble the router over the given state and static asset directory.
pub fn build_router(state: AppState, static_dir: &FsPath) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .route("/blocks", get(list_blocks))
        .route("/blocks/:index", get(get_block))
        .route("/validate", get(validate_chain))
        .route("/health", get(health))
        .route("/version", get(version))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub block: Block,
}

/// POST /upload — multipart form with a `file` part. Stores the artifact,
/// hashes its bytes, appends a block recording both.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    // 1) pull the `file` part out of the form
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("failed to read upload: {e}")))?;
        file = Some((name, data.to_vec()));
        break;
    }
    let Some((name, data)) = file else {
        return Err((StatusCode::BAD_REQUEST, "no file uploaded".into()));
    };

    // 2) the artifact must be on disk before the chain records it
    let stored_name = storage::sanitize_file_name(&name);
    storage::store_artifact(&state.upload_dir, &stored_name, &data).map_err(|e| {
        tracing::error!(error = %e, file = %stored_name, "artifact write failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to store file".into(),
        )
    })?;

    // 3) hash the content and append
    let content_hash = hash_bytes(&data);
    let block = state
        .ledger
        .write()
        .unwrap()
        .append(&stored_name, &content_hash);
    tracing::info!(
        index = block.index,
        file = %stored_name,
        hash = %block.hash,
        "block appended"
    );

    Ok(Json(UploadResponse {
        message: "file recorded on ledger",
        block,
    }))
}

/// GET /blocks — full chain snapshot, oldest first.
pub async fn list_blocks(State(state): State<AppState>) -> Json<Vec<Block>> {
    Json(state.ledger.read().unwrap().snapshot())
}

/// GET /blocks/:index — single block by chain position.
pub async fn get_block(
    State(state): State<AppState>,
    Path(index): Path<u64>,
) -> Result<Json<Block>, (StatusCode, String)> {
    let guard = state.ledger.read().unwrap();
    let block = guard
        .get(index)
        .ok_or((StatusCode::NOT_FOUND, "not found".to_string()))?;
    Ok(Json(block.clone()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub ok: bool,
    pub failing_index: Option<u64>,
    pub detail: Option<String>,
}

/// GET /validate — recompute every hash and link in the chain. A corrupted
/// chain is reported with its first failing index, never repaired.
pub async fn validate_chain(State(state): State<AppState>) -> Json<ValidateResponse> {
    match state.ledger.read().unwrap().validate() {
        Ok(()) => Json(ValidateResponse {
            ok: true,
            failing_index: None,
            detail: None,
        }),
        Err(e) => {
            tracing::error!(index = e.index(), error = %e, "chain integrity violation");
            Json(ValidateResponse {
                ok: false,
                failing_index: Some(e.index()),
                detail: Some(e.to_string()),
            })
        }
    }
}

/// GET /health
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET /version
#[derive(Serialize)]
pub struct Version {
    pub version: &'static str,
    pub git_sha: Option<&'static str>,
}
pub async fn version() -> Json<Version> {
    Json(Version {
        version: env!("CARGO_PKG_VERSION"),
        git_sha: option_env!("GIT_SHA"),
    })
}
