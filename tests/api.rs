//! End-to-end tests over the HTTP surface: the upload flow, chain queries,
//! and the integrity check.

use std::sync::{Arc, RwLock};

use provchain_node::ledger::Ledger;
use provchain_node::routes::{build_router, AppState};
use serde_json::Value;

/// Start the node on an ephemeral port and return its base URL.
async fn start_test_server() -> String {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let upload_dir = tmp.path().join("uploads");
    let static_dir = tmp.path().join("static");
    std::fs::create_dir_all(&static_dir).expect("create static dir");
    std::fs::write(static_dir.join("index.html"), "<!doctype html>").expect("write index");

    let state = AppState {
        ledger: Arc::new(RwLock::new(Ledger::new())),
        upload_dir,
    };
    let app = build_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
        // keep the temp dir alive for the lifetime of the server
        let _keep = tmp;
    });

    format!("http://{addr}")
}

async fn upload(base: &str, name: &str, bytes: &[u8]) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);
    reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("upload request")
}

async fn get_json(base: &str, path: &str) -> Value {
    reqwest::get(format!("{base}{path}"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body")
}

#[tokio::test]
async fn health_and_version_respond() {
    let base = start_test_server().await;

    let health = get_json(&base, "/health").await;
    assert_eq!(health["status"], "ok");

    let version = get_json(&base, "/version").await;
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn fresh_node_serves_only_genesis() {
    let base = start_test_server().await;

    let blocks = get_json(&base, "/blocks").await;
    let chain = blocks.as_array().expect("array of blocks");
    assert_eq!(chain.len(), 1);

    let genesis = chain[0].as_object().expect("block object");
    assert_eq!(genesis["index"], 0);
    assert_eq!(genesis["prevHash"], "0");
    assert_eq!(genesis["contentHash"], "0");
    for key in ["index", "timestamp", "fileName", "contentHash", "prevHash", "hash"] {
        assert!(genesis.contains_key(key), "missing field {key}");
    }
}

#[tokio::test]
async fn upload_flow_links_blocks_and_validates() {
    let base = start_test_server().await;
    let genesis_hash = get_json(&base, "/blocks").await[0]["hash"]
        .as_str()
        .expect("genesis hash")
        .to_string();

    let resp = upload(&base, "a.txt", b"hello").await;
    assert_eq!(resp.status(), 200);
    let first = resp.json::<Value>().await.expect("upload response");
    assert_eq!(first["block"]["index"], 1);
    assert_eq!(first["block"]["fileName"], "a.txt");
    assert_eq!(first["block"]["prevHash"], genesis_hash.as_str());
    assert_eq!(
        first["block"]["contentHash"],
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );

    let resp = upload(&base, "b.txt", b"world").await;
    let second = resp.json::<Value>().await.expect("upload response");
    assert_eq!(second["block"]["index"], 2);
    assert_eq!(second["block"]["prevHash"], first["block"]["hash"]);

    let verdict = get_json(&base, "/validate").await;
    assert_eq!(verdict["ok"], true);
    assert!(verdict["failingIndex"].is_null());
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let base = start_test_server().await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let resp = reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("upload request");
    assert_eq!(resp.status(), 400);

    // nothing was appended
    let blocks = get_json(&base, "/blocks").await;
    assert_eq!(blocks.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn block_lookup_by_index() {
    let base = start_test_server().await;
    upload(&base, "a.txt", b"hello").await;

    let block = get_json(&base, "/blocks/1").await;
    assert_eq!(block["index"], 1);
    assert_eq!(block["fileName"], "a.txt");

    let resp = reqwest::get(format!("{base}/blocks/99"))
        .await
        .expect("request");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn concurrent_uploads_extend_a_single_chain() {
    const UPLOADS: usize = 8;
    let base = start_test_server().await;

    let handles: Vec<_> = (0..UPLOADS)
        .map(|i| {
            let base = base.clone();
            tokio::spawn(async move {
                let name = format!("file-{i}.bin");
                let body = format!("contents {i}").into_bytes();
                let resp = upload(&base, &name, &body).await;
                assert_eq!(resp.status(), 200);
            })
        })
        .collect();
    for h in handles {
        h.await.expect("upload task");
    }

    let blocks = get_json(&base, "/blocks").await;
    let chain = blocks.as_array().expect("array of blocks");
    assert_eq!(chain.len(), 1 + UPLOADS);
    for (i, block) in chain.iter().enumerate() {
        assert_eq!(block["index"], i as u64);
        if i > 0 {
            assert_eq!(block["prevHash"], chain[i - 1]["hash"]);
        }
    }

    let verdict = get_json(&base, "/validate").await;
    assert_eq!(verdict["ok"], true);
}
