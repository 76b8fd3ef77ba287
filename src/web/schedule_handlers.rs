// src/web/schedule_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        schedule::{SchedulePayload, ToggleCapacidadePayload},
        user::Ctx,
    },
    services::schedule_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub turma_id: Option<i64>,
}

// GET /api/weeks?turma_id=
pub async fn handle_list_weeks(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let rows = schedule_service::list_schedules(&state.db_pool, &ctx, query.turma_id).await?;
    Ok(Json(rows))
}

// GET /api/weeks/{id}
pub async fn handle_get_week(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(schedule_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let row = schedule_service::get_schedule(&state.db_pool, &ctx, schedule_id).await?;
    Ok(Json(row))
}

// POST /api/weeks
pub async fn handle_create_week(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Json(payload): Json<SchedulePayload>,
) -> AppResult<impl IntoResponse> {
    let row = schedule_service::create_schedule(&state.db_pool, &ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

// PUT /api/weeks/{id}
pub async fn handle_update_week(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(schedule_id): Path<i64>,
    Json(payload): Json<SchedulePayload>,
) -> AppResult<impl IntoResponse> {
    let row = schedule_service::update_schedule(&state.db_pool, &ctx, schedule_id, &payload).await?;
    Ok(Json(row))
}

// DELETE /api/weeks/{id}
pub async fn handle_delete_week(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(schedule_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    schedule_service::delete_schedule(&state.db_pool, &ctx, schedule_id).await?;
    Ok(Json(json!({ "message": "Semana excluída com sucesso" })))
}

// POST /api/weeks/{id}/toggle
pub async fn handle_toggle_week(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(schedule_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let completed = schedule_service::toggle_week_complete(&state.db_pool, &ctx, schedule_id).await?;
    Ok(Json(json!({ "completed": completed })))
}

// POST /api/weeks/{id}/toggle_capacidade
pub async fn handle_toggle_capacidade(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(schedule_id): Path<i64>,
    Json(payload): Json<ToggleCapacidadePayload>,
) -> AppResult<impl IntoResponse> {
    let index = payload.index_as_string().ok_or(AppError::MissingIndex)?;
    let new_set =
        schedule_service::toggle_capability(&state.db_pool, &ctx, schedule_id, &index).await?;
    Ok(Json(json!({ "capacidades_completed": new_set })))
}
