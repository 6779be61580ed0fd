//! HTTP surface: every operation as a JSON endpoint, plus the local asset
//! endpoint the dashboard loads icons from.
//!
//! # Response envelope
//!
//! Every `/api` response body has the same shape:
//!
//! ```json
//! { "success": false, "data": null, "error": "invalid title: must not be empty", "kind": "validation_error" }
//! ```
//!
//! | `kind`                               | Status |
//! |--------------------------------------|--------|
//! | (success)                            | 200    |
//! | `validation_error`                   | 422    |
//! | `not_found`                          | 404    |
//! | `upstream_error`, `download_error`   | 502    |
//! | anything else                        | 500    |
//!
//! Malformed JSON bodies and non-numeric positions are validation errors.
//! `/api` responses carry `Cache-Control: no-store`.
//!
//! # Blocking work
//!
//! [`ConfigService`] does synchronous file I/O, so each call runs on the
//! blocking pool via [`run_blocking`].

use std::future::Future;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use homer_core::{
    is_safe_file_name, CategoryInput, DownloadInput, GlobalSettingsInput, ItemUpdateInput,
    MoveInput, NewItemInput, ValidationError,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::local_assets;
use crate::application::{CatalogError, ConfigService, IconCatalog, ManagerError};

/// Shared handler state.  Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigService>,
    pub icons: Arc<IconCatalog>,
}

impl AppState {
    pub fn new(config: ConfigService, icons: IconCatalog) -> Self {
        Self {
            config: Arc::new(config),
            icons: Arc::new(icons),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Builds the full router.  The asset route is mounted under the catalog's
/// URL prefix so the paths written into `logo` fields resolve here.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/config", get(get_config))
        .route("/config/settings", put(update_global_settings))
        .route("/services", post(add_category))
        .route(
            "/services/:index",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/services/:index/move", post(move_category))
        .route("/services/:index/items", post(add_item))
        .route(
            "/services/:index/items/:item",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/services/:index/items/:item/move", post(move_item))
        .route("/icons", get(list_available_icons))
        .route("/icons/local", get(list_local_icons))
        .route("/icons/download", post(download_icon))
        .layer(middleware::map_response(no_store));

    let asset_route = format!("/{}/:file", state.icons.url_prefix().trim_matches('/'));

    Router::new()
        .nest("/api", api)
        .route(&asset_route, get(serve_asset))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Serves `router` on `addr` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (e.g., the port is
/// already in use) or the server fails while running.
pub async fn run_server(
    addr: SocketAddr,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    info!(addr = %listener.local_addr().unwrap_or(addr), "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

async fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

// ── Envelope ──────────────────────────────────────────────────────────────────

/// Uniform response body for every `/api` endpoint.
#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub kind: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct Changed {
    changed: bool,
}

fn ok<T: Serialize>(data: T) -> Response {
    Json(CommandResult {
        success: true,
        data: Some(data),
        error: None,
        kind: None,
    })
    .into_response()
}

/// A failed operation on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError(ManagerError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            "validation_error" => StatusCode::UNPROCESSABLE_ENTITY,
            "not_found" => StatusCode::NOT_FOUND,
            "upstream_error" | "download_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(e: ManagerError) -> Self {
        Self(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self(e.into())
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(kind, error = %message, "operation failed");
        } else {
            info!(kind, error = %message, "request rejected");
        }
        let body: CommandResult<()> = CommandResult {
            success: false,
            data: None,
            error: Some(message),
            kind: Some(kind),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult = Result<Response, ApiError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ValidationError::new("body", rejection.body_text()).into())
}

fn position<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ValidationError::new("position", rejection.body_text()).into())
}

/// Runs a synchronous [`ConfigService`] call on the blocking pool.
async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ConfigService) -> Result<T, ManagerError> + Send + 'static,
{
    let service = Arc::clone(&state.config);
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ManagerError::Task(e.to_string()))?
        .map_err(ApiError::from)
}

// ── Document handlers ─────────────────────────────────────────────────────────

async fn get_config(State(state): State<AppState>) -> ApiResult {
    let doc = run_blocking(&state, |s| s.get_config()).await?;
    Ok(ok(doc))
}

async fn update_global_settings(
    State(state): State<AppState>,
    payload: Result<Json<GlobalSettingsInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    let changed = run_blocking(&state, move |s| s.update_global_settings(input)).await?;
    Ok(ok(Changed { changed }))
}

async fn add_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    let changed = run_blocking(&state, move |s| s.add_category(input)).await?;
    Ok(ok(Changed { changed }))
}

async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
) -> ApiResult {
    let index = position(path)?;
    let category = run_blocking(&state, move |s| s.get_category(index)).await?;
    Ok(ok(category))
}

async fn update_category(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult {
    let index = position(path)?;
    let input = body(payload)?;
    let changed = run_blocking(&state, move |s| s.update_category(index, input)).await?;
    Ok(ok(Changed { changed }))
}

async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
) -> ApiResult {
    let index = position(path)?;
    let changed = run_blocking(&state, move |s| s.delete_category(index)).await?;
    Ok(ok(Changed { changed }))
}

async fn move_category(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
    payload: Result<Json<MoveInput>, JsonRejection>,
) -> ApiResult {
    let index = position(path)?;
    let MoveInput { direction } = body(payload)?;
    let changed = run_blocking(&state, move |s| s.move_category(index, direction)).await?;
    Ok(ok(Changed { changed }))
}

async fn add_item(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
    payload: Result<Json<NewItemInput>, JsonRejection>,
) -> ApiResult {
    let category = position(path)?;
    let input = body(payload)?;
    let changed = run_blocking(&state, move |s| s.add_item(category, input)).await?;
    Ok(ok(Changed { changed }))
}

async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<(usize, usize)>, PathRejection>,
) -> ApiResult {
    let (category, item) = position(path)?;
    let found = run_blocking(&state, move |s| s.get_item(category, item)).await?;
    Ok(ok(found))
}

async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<(usize, usize)>, PathRejection>,
    payload: Result<Json<ItemUpdateInput>, JsonRejection>,
) -> ApiResult {
    let (category, item) = position(path)?;
    let input = body(payload)?;
    let changed = run_blocking(&state, move |s| s.update_item(category, item, input)).await?;
    Ok(ok(Changed { changed }))
}

async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<(usize, usize)>, PathRejection>,
) -> ApiResult {
    let (category, item) = position(path)?;
    let changed = run_blocking(&state, move |s| s.delete_item(category, item)).await?;
    Ok(ok(Changed { changed }))
}

async fn move_item(
    State(state): State<AppState>,
    path: Result<Path<(usize, usize)>, PathRejection>,
    payload: Result<Json<MoveInput>, JsonRejection>,
) -> ApiResult {
    let (category, item) = position(path)?;
    let MoveInput { direction } = body(payload)?;
    let changed = run_blocking(&state, move |s| s.move_item(category, item, direction)).await?;
    Ok(ok(Changed { changed }))
}

// ── Icon handlers ─────────────────────────────────────────────────────────────

async fn list_available_icons(State(state): State<AppState>) -> ApiResult {
    let icons = state.icons.list_available().await?;
    Ok(ok(icons.as_slice()))
}

async fn list_local_icons(State(state): State<AppState>) -> ApiResult {
    Ok(ok(state.icons.list_local().await))
}

async fn download_icon(
    State(state): State<AppState>,
    payload: Result<Json<DownloadInput>, JsonRejection>,
) -> ApiResult {
    let input = body(payload)?;
    input.validate()?;
    let path = state.icons.download(&input.name, input.format).await?;
    Ok(ok(path))
}

// ── Assets ────────────────────────────────────────────────────────────────────

async fn serve_asset(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    if !is_safe_file_name(&file) {
        return (StatusCode::BAD_REQUEST, "invalid file name").into_response();
    }

    match local_assets::read_asset(state.icons.assets_dir(), &file).await {
        Ok(bytes) => (
            [
                (CONTENT_TYPE, local_assets::content_type_for(&file)),
                (CACHE_CONTROL, "public, max-age=3600"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
        Err(e) => {
            error!(file = %file, error = %e, "failed to read asset");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
