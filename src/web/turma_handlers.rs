// src/web/turma_handlers.rs
use crate::{
    error::AppResult,
    models::{turma::TurmaPayload, user::Ctx},
    services::{progress_service, turma_service},
    state::AppState,
};
use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

// GET /api/turmas
pub async fn handle_list_turmas(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
) -> AppResult<impl IntoResponse> {
    let turmas = turma_service::list_turmas(&state.db_pool, &ctx).await?;
    Ok(Json(turmas))
}

// POST /api/turmas
pub async fn handle_create_turma(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Json(payload): Json<TurmaPayload>,
) -> AppResult<impl IntoResponse> {
    let turma = turma_service::create_turma(&state.db_pool, &ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(turma)))
}

// PUT /api/turmas/{id}
pub async fn handle_update_turma(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(turma_id): Path<i64>,
    Json(payload): Json<TurmaPayload>,
) -> AppResult<impl IntoResponse> {
    let turma = turma_service::update_turma(&state.db_pool, &ctx, turma_id, &payload).await?;
    Ok(Json(turma))
}

// DELETE /api/turmas/{id} (soft-delete)
pub async fn handle_delete_turma(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(turma_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    turma_service::soft_delete_turma(&state.db_pool, &ctx, turma_id).await?;
    Ok(Json(json!({ "message": "Turma desativada com sucesso" })))
}

// GET /api/turmas/{id}/progresso
pub async fn handle_progresso_turma(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(turma_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let progresso = progress_service::progresso_turma(&state.db_pool, &ctx, turma_id).await?;
    Ok(Json(progresso))
}
