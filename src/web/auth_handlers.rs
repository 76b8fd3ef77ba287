// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::LoginForm,
    services::user_service,
    state::AppState,
    templates::LoginPage,
};
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect},
};
use tower_sessions::Session;

// GET /login
pub async fn show_login_form(session: Session) -> impl IntoResponse {
    if session.get::<i64>("user_id").await.ok().flatten().is_some() {
        tracing::debug!("GET /login: utilizador já logado, redirecionando para /app");
        return Redirect::to("/app").into_response();
    }

    let template = LoginPage { error: None };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Falha ao renderizar template de login: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao carregar a página.",
            )
                .into_response()
        }
    }
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Tentativa de login para: {}", form.email);

    // Contas inativas falham aqui mesmo com a senha certa
    match user_service::verify_credentials(&state.db_pool, &form.email, &form.password).await? {
        Some(user) => {
            session
                .cycle_id()
                .await // Gera novo ID de sessão (segurança)
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
            session
                .insert("user_id", user.id)
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

            tracing::info!("✅ Login bem-sucedido para: {}", user.email);
            Ok(Redirect::to("/app").into_response())
        }
        None => {
            let template = LoginPage {
                error: Some("Email ou senha inválidos.".to_string()),
            };
            match template.render() {
                Ok(html) => Ok(Html(html).into_response()),
                Err(e) => {
                    tracing::error!("Falha ao renderizar template de login com erro: {}", e);
                    Err(AppError::InternalServerError)
                }
            }
        }
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<i64> = session.get("user_id").await.ok().flatten();

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    if let Some(id) = user_id {
        tracing::info!("🚪 Utilizador '{}' desligado.", id);
    } else {
        tracing::info!("🚪 Sessão anónima desligada.");
    }

    Ok(Redirect::to("/login"))
}
