// src/web/export_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::Ctx,
    services::export_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Json, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub turma_id: Option<i64>,
}

// GET /api/export/json?turma_id=
// Download direto dos registos (Content-Disposition de anexo)
pub async fn handle_export_json(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let (filename, records) =
        export_service::registos_para_user(&state.db_pool, &ctx, query.turma_id).await?;

    let body = serde_json::to_string_pretty(&records).map_err(|e| {
        tracing::error!("Falha ao serializar exportação JSON: {}", e);
        AppError::InternalServerError
    })?;

    tracing::info!("📄 Exportação JSON '{}.json' ({} registos) para user {}.", filename, records.len(), ctx.user_id);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.json\"", filename),
            ),
        ],
        body,
    ))
}

// GET /api/export/documento?turma_id=
// Modelo de documento agnóstico, consumido pelos renderizadores de
// PDF/folha de cálculo
pub async fn handle_export_documento(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let documento =
        export_service::documento_para_user(&state.db_pool, &ctx, query.turma_id).await?;
    tracing::info!("📄 Modelo de documento '{}' montado para user {}.", documento.filename, ctx.user_id);
    Ok(Json(documento))
}
