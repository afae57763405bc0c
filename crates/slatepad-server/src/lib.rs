//! Slatepad Drawing Server
//!
//! JSON CRUD over named drawings, backed by any [`DrawingStore`].
//!
//! ## Routes
//!
//! ```text
//! GET    /api/drawings          list, most recently updated first
//! POST   /api/drawings          { "name", "data" }        -> drawing
//! PUT    /api/drawings          { "id", "name", "data" }  -> drawing (404 if unknown)
//! DELETE /api/drawings?id=...   -> { "success": true }    (400 without id)
//! GET    /health
//! ```

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use slatepad_core::error::{ValidationError, validate_name};
use slatepad_core::storage::{
    DEFAULT_MAX_NAME_LEN, Drawing, DrawingStore, DrawingUpdate, NewDrawing, StorageError,
};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrawingStore>,
}

/// Handler errors, rendered as `{ "error": "..." }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub name: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub id: String,
    pub name: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Build the application router.
pub fn router(store: Arc<dyn DrawingStore>) -> Router {
    let state = AppState { store };
    Router::new()
        .route(
            "/api/drawings",
            get(list_drawings)
                .post(create_drawing)
                .put(update_drawing)
                .delete(delete_drawing),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

async fn list_drawings(State(state): State<AppState>) -> ApiResult<Json<Vec<Drawing>>> {
    Ok(Json(state.store.list().await?))
}

async fn create_drawing(
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> ApiResult<Json<Drawing>> {
    let name = validate_name(&body.name, DEFAULT_MAX_NAME_LEN)?;
    let drawing = state
        .store
        .create(NewDrawing {
            name,
            data: body.data,
        })
        .await?;
    info!("Created drawing {} ({})", drawing.id, drawing.name);
    Ok(Json(drawing))
}

async fn update_drawing(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Json<Drawing>> {
    let name = validate_name(&body.name, DEFAULT_MAX_NAME_LEN)?;
    let drawing = state
        .store
        .update(DrawingUpdate {
            id: body.id,
            name,
            data: body.data,
        })
        .await
        .inspect_err(|e| warn!("Update failed: {}", e))?;
    Ok(Json(drawing))
}

async fn delete_drawing(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing id".to_string()))?;
    state.store.delete(&id).await?;
    info!("Deleted drawing {}", id);
    Ok(Json(DeleteResponse { success: true }))
}
