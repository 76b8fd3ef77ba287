// src/web/user_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::Ctx,
    services::user_service,
    state::AppState,
    templates::AppPage,
};
use askama::Template;
use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse},
};

// GET /app — shell da aplicação (a UI em si é fetch/JSON)
pub async fn app_page_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<Ctx>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /app: acesso para {}", ctx.user_id);

    let user = user_service::find_user_by_id(&state.db_pool, ctx.user_id)
        .await?
        .ok_or_else(|| {
            tracing::error!("CRÍTICO: user_id '{}' autenticado não encontrado na DB!", ctx.user_id);
            AppError::InternalServerError
        })?;

    let template = AppPage {
        user_name: user.name,
        is_admin: ctx.role.is_admin(),
    };

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template AppPage: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}
