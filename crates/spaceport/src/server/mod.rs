//! HTTP surface for spaceport.
//!
//! The router splits requests into the JSON API under `/api` ([`api`]) and
//! the HTML listing pages ([`pages`]). Handlers return [`crate::Result`]; an
//! error escaping a handler becomes a JSON `{"message": ...}` body with the
//! status from [`Error::status`].

pub mod api;
pub mod pages;

use std::sync::{Arc, Mutex};

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tera::Tera;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    storage: Arc<Mutex<Storage>>,
    templates: Arc<Tera>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wrap an opened storage and loaded templates for sharing across requests.
    #[must_use]
    pub fn new(storage: Storage, templates: Tera) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            templates: Arc::new(templates),
        }
    }

    /// Run a storage operation on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or [`Error::Internal`] if the worker
    /// panicked or the storage lock is poisoned.
    pub async fn with_storage<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Storage) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || {
            let guard = storage
                .lock()
                .map_err(|_| Error::internal("storage lock poisoned"))?;
            op(&*guard)
        })
        .await
        .map_err(|e| Error::internal(format!("storage worker join error: {e}")))?
    }

    pub(crate) fn templates(&self) -> &Tera {
        &self.templates
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(api::liveness_get).post(api::liveness_post))
        .route("/api/", get(api::liveness_get).post(api::liveness_post))
        .route(
            "/api/rockets",
            get(api::list_rockets).post(api::create_rocket),
        )
        .route(
            "/api/companies",
            get(api::list_companies).post(api::create_company),
        )
        .route(
            "/api/launches",
            get(api::list_launches).post(api::create_launch),
        )
        .route("/api/rockets/{id}", get(api::get_rocket))
        .route("/api/companies/{id}", get(api::get_company))
        .route("/api/launches/{id}", get(api::get_launch))
        .route("/rockets", get(pages::rockets))
        .route("/launches", get(pages::launches))
        .route("/companies", get(pages::companies))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the application on an already-bound listener until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections");
}

async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api") {
        message(StatusCode::NOT_FOUND, "not found")
    } else {
        (StatusCode::NOT_FOUND, "not found").into_response()
    }
}

/// A JSON `{"message": ...}` response.
pub(crate) fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
            message(status, "internal server error")
        } else {
            warn!("Rejected request: {}", self);
            message(status, self.to_string())
        }
    }
}

impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}
