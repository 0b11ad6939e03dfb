//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::{OperationContext, Snapshot};
use crate::error::AppError;
use crate::handlers::{ConnectTokenCommand, ConnectTokenHandler, SnapshotCommand, SnapshotHandler};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectTokenRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectTokenResponse {
    #[serde(rename = "connectToken")]
    pub connect_token: String,
    pub raw: JsonValue,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    /// Missing and blank both fail validation with a JSON 400
    #[serde(default)]
    pub item_id: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/pluggy/connect-token", post(create_connect_token))
        .route("/users/:user_id/snapshot", get(get_user_snapshot))
}

// =========================================================================
// GET / and GET /health
// =========================================================================

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Pluggy relay API running",
    })
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =========================================================================
// POST /pluggy/connect-token
// =========================================================================

/// Issue a Pluggy Connect widget token
async fn create_connect_token(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<ConnectTokenRequest>,
) -> Result<Json<ConnectTokenResponse>, AppError> {
    let handler = ConnectTokenHandler::new(state.pluggy.clone());

    let command = ConnectTokenCommand::new(request.user_id);
    let command = if let Some(item_id) = request.item_id {
        command.with_item_id(item_id)
    } else {
        command
    };

    let token = handler.execute(command, &context).await?;

    Ok(Json(ConnectTokenResponse {
        connect_token: token.token,
        raw: token.raw,
    }))
}

// =========================================================================
// GET /users/:user_id/snapshot?item_id=
// =========================================================================

/// Build a financial snapshot for one connection
async fn get_user_snapshot(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(user_id): Path<String>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<Snapshot>, AppError> {
    let handler = SnapshotHandler::new(state.pluggy.clone(), state.config.transaction_window_days);

    let snapshot = handler
        .execute(SnapshotCommand::new(user_id, query.item_id), &context)
        .await?;

    Ok(Json(snapshot))
}
