// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        admin_handlers, auth_handlers, export_handlers, mw_admin, mw_auth, schedule_handlers,
        turma_handlers, user_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/", get(|| async { axum::response::Redirect::permanent("/login") }));

    // --- Rotas de Admin (gestão de contas) ---
    // Exigem login E role admin
    let admin_routes = Router::new()
        .route(
            "/users",
            get(admin_handlers::handle_list_users).post(admin_handlers::handle_create_user),
        )
        .route(
            "/users/{id}",
            axum::routing::put(admin_handlers::handle_update_user)
                .delete(admin_handlers::handle_delete_user),
        )
        // Aplica APENAS mw_admin aqui (mw_auth será aplicado no router pai)
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    // --- API de turmas e cronogramas ---
    let api_routes = Router::new()
        .route(
            "/turmas",
            get(turma_handlers::handle_list_turmas).post(turma_handlers::handle_create_turma),
        )
        .route(
            "/turmas/{id}",
            axum::routing::put(turma_handlers::handle_update_turma)
                .delete(turma_handlers::handle_delete_turma),
        )
        .route("/turmas/{id}/progresso", get(turma_handlers::handle_progresso_turma))
        .route(
            "/weeks",
            get(schedule_handlers::handle_list_weeks).post(schedule_handlers::handle_create_week),
        )
        .route(
            "/weeks/{id}",
            get(schedule_handlers::handle_get_week)
                .put(schedule_handlers::handle_update_week)
                .delete(schedule_handlers::handle_delete_week),
        )
        .route("/weeks/{id}/toggle", post(schedule_handlers::handle_toggle_week))
        .route(
            "/weeks/{id}/toggle_capacidade",
            post(schedule_handlers::handle_toggle_capacidade),
        )
        .route("/export/json", get(export_handlers::handle_export_json))
        .route("/export/documento", get(export_handlers::handle_export_documento));

    // --- Rotas Autenticadas ---
    // Exigem *pelo menos* login
    let authenticated_routes = Router::new()
        .route("/app", get(user_handlers::app_page_handler))
        .nest("/api", api_routes)
        .nest("/api/admin", admin_routes)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    // --- Router Final ---
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
