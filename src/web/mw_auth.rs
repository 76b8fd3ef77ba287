// src/web/mw_auth.rs
use crate::{
    error::AppError,
    models::user::{Ctx, Role},
    services::user_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Middleware que verifica se o utilizador está logado e constrói o
// contexto (user_id, role) passado explicitamente aos serviços
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<i64>("user_id").await {
        Ok(Some(user_id)) => {
            // A role vem sempre da DB, nunca da sessão (pode ter mudado)
            let user = user_service::find_user_by_id(&state.db_pool, user_id).await?;
            match user {
                Some(u) if u.active => {
                    tracing::debug!("Autenticação MW: utilizador {} autenticado.", user_id);
                    let ctx = Ctx {
                        user_id: u.id,
                        role: Role::from_str_coerce(&u.role),
                    };
                    request.extensions_mut().insert(ctx);
                    Ok(next.run(request).await)
                }
                _ => {
                    // Conta apagada ou desativada a meio da sessão
                    tracing::warn!("Autenticação MW: sessão órfã/inativa para {}. Limpando.", user_id);
                    session
                        .delete()
                        .await
                        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;
                    Ok(Redirect::to("/login").into_response())
                }
            }
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: não autenticado. Redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            tracing::error!("Autenticação MW: erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}
