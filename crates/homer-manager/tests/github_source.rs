//! `GithubIconSource` against a local stand-in for the GitHub API and the raw
//! content host.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use homer_core::IconFormat;
use homer_manager::application::{CatalogError, IconSource};
use homer_manager::domain::IconSourceSettings;
use homer_manager::infrastructure::GithubIconSource;
use serde_json::json;

async fn tree(headers: HeaderMap) -> impl IntoResponse {
    let accept = headers.get("accept").and_then(|v| v.to_str().ok());
    let agent = headers.get("user-agent").and_then(|v| v.to_str().ok());
    if accept != Some("application/vnd.github.v3+json") || agent != Some("Homer-Config-Manager") {
        return (StatusCode::FORBIDDEN, "missing headers").into_response();
    }
    axum::Json(json!({
        "sha": "abc",
        "truncated": false,
        "tree": [
            {"path": "png", "mode": "040000", "type": "tree", "sha": "1"},
            {"path": "png/jellyfin.png", "mode": "100644", "type": "blob", "sha": "2", "size": 10},
            {"path": "svg/jellyfin.svg", "mode": "100644", "type": "blob", "sha": "3", "size": 20}
        ]
    }))
    .into_response()
}

async fn raw(Path((format, file)): Path<(String, String)>) -> impl IntoResponse {
    if file.starts_with("jellyfin") && file.ends_with(&format!(".{format}")) {
        (StatusCode::OK, format!("bytes of {file}")).into_response()
    } else {
        (StatusCode::NOT_FOUND, "404: Not Found").into_response()
    }
}

async fn start_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/repos/selfhst/icons/git/trees/main", get(tree))
        .route("/selfhst/icons/main/:format/:file", get(raw))
        .route(
            "/repos/limited/icons/git/trees/main",
            get(|| async { (StatusCode::FORBIDDEN, "API rate limit exceeded") }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve upstream") });
    addr
}

fn settings(addr: SocketAddr, repository: &str) -> IconSourceSettings {
    IconSourceSettings {
        repository: repository.to_string(),
        api_base: format!("http://{addr}"),
        raw_base: format!("http://{addr}/"),
        ..IconSourceSettings::default()
    }
}

#[tokio::test]
async fn test_fetch_tree_sends_headers_and_parses_entries() {
    let addr = start_upstream().await;
    let source = GithubIconSource::new(settings(addr, "selfhst/icons")).unwrap();

    let entries = source.fetch_tree().await.unwrap();

    assert_eq!(entries.len(), 3);
    assert!(!entries[0].is_blob());
    assert_eq!(entries[1].path, "png/jellyfin.png");
    assert!(entries[1].is_blob());
}

#[tokio::test]
async fn test_fetch_tree_failure_carries_status_and_body() {
    let addr = start_upstream().await;
    let source = GithubIconSource::new(settings(addr, "limited/icons")).unwrap();

    let err = source.fetch_tree().await.unwrap_err();

    assert!(matches!(err, CatalogError::Upstream { status: Some(403), .. }));
    assert!(err.to_string().contains("rate limit"));
}

#[tokio::test]
async fn test_fetch_tree_unreachable_host_has_no_status() {
    // Bind then drop so the port is very likely closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = GithubIconSource::new(settings(addr, "selfhst/icons")).unwrap();

    let err = source.fetch_tree().await.unwrap_err();

    assert!(matches!(err, CatalogError::Upstream { status: None, .. }));
}

#[tokio::test]
async fn test_fetch_icon_returns_bytes() {
    let addr = start_upstream().await;
    let source = GithubIconSource::new(settings(addr, "selfhst/icons")).unwrap();

    let bytes = source.fetch_icon("jellyfin", IconFormat::Svg).await.unwrap();

    assert_eq!(bytes, b"bytes of jellyfin.svg");
}

#[tokio::test]
async fn test_fetch_icon_name_with_reserved_characters_arrives_intact() {
    let addr = start_upstream().await;
    let source = GithubIconSource::new(settings(addr, "selfhst/icons")).unwrap();

    let bytes = source
        .fetch_icon("jellyfin #2?v=1", IconFormat::Png)
        .await
        .unwrap();

    assert_eq!(bytes, b"bytes of jellyfin #2?v=1.png");
}

#[tokio::test]
async fn test_fetch_icon_not_found_is_download_error() {
    let addr = start_upstream().await;
    let source = GithubIconSource::new(settings(addr, "selfhst/icons")).unwrap();

    let err = source.fetch_icon("nope", IconFormat::Png).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, CatalogError::Download { .. }));
}
