// src/web/mw_admin.rs
use crate::{error::AppError, models::user::Ctx};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Middleware que exige a role admin no contexto do pedido.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_admin(
    Extension(ctx): Extension<Ctx>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if ctx.role.is_admin() {
        tracing::debug!("Admin MW: acesso admin concedido para {}", ctx.user_id);
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Admin MW: acesso negado para {} (sem role admin).", ctx.user_id);
        Err(AppError::Unauthorized)
    }
}
