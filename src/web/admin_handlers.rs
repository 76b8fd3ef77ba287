// src/web/admin_handlers.rs
use crate::{
    error::AppResult,
    models::user::{CreateUserPayload, Ctx, UpdateUserPayload, UserDto},
    services::user_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

// GET /api/admin/users
pub async fn handle_list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users: Vec<UserDto> = user_service::list_users(&state.db_pool)
        .await?
        .into_iter()
        .map(UserDto::from)
        .collect();
    Ok(Json(users))
}

// POST /api/admin/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> AppResult<impl IntoResponse> {
    let new_id = user_service::create_user(&state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": new_id }))))
}

// PUT /api/admin/users/{id}
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserPayload>,
) -> AppResult<impl IntoResponse> {
    user_service::update_user(&state.db_pool, user_id, &payload).await?;
    Ok(Json(json!({ "message": "Utilizador atualizado com sucesso" })))
}

// DELETE /api/admin/users/{id}
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Path(user_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    user_service::delete_user(&state.db_pool, &ctx, user_id).await?;
    Ok(Json(json!({ "message": "Utilizador excluído com sucesso" })))
}
