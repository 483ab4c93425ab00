//! Route handlers for the HTTP API

use super::AppState;
use super::error::ApiError;
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use repurpose_core::storage::SavedPost;
use repurpose_core::{AskRequest, AskResponse, GenerateRequest, GenerateResponse, NoProgress};
use serde::Deserialize;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = body?;
    tracing::info!(
        tone = %request.tone,
        platforms = ?request.platforms,
        save = request.save,
        "generate request"
    );

    let response = state.service.handle_generate(&request, &NoProgress).await?;
    Ok(Json(response))
}

pub async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = body?;
    let response = state.service.ask(&request.question).await?;
    Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub user_id: Option<i64>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub include_content: bool,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<SavedPost>>, ApiError> {
    let posts = state
        .service
        .history(params.user_id, params.limit, params.include_content)?;
    Ok(Json(posts))
}
