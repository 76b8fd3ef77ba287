// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    // Falhas de validação de pedido (campo obrigatório vazio, etc.)
    #[error("{0}")]
    ValidationError(String),

    // O id não resolve dentro do âmbito de posse do utilizador
    #[error("Registo não encontrado")]
    NotFound,

    #[error("Email já registado")]
    DuplicateEmail,

    // Admin a tentar apagar a própria conta
    #[error("Não pode excluir a própria conta")]
    SelfDeletion,

    // Payload do toggle de capacidade sem o campo 'index'
    #[error("Índice da capacidade não fornecido")]
    MissingIndex,

    // Criação de cronograma sem turma_id no payload
    #[error("Turma não especificada")]
    MissingTurma,

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,

    #[error("Não autorizado")]
    Unauthorized,
}

// Como converter AppError numa resposta HTTP (JSON, a UI é fetch/JSON)
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string())
            }
            AppError::EnvVarError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".to_string())
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Registo não encontrado.".to_string()),
            AppError::DuplicateEmail => {
                (StatusCode::CONFLICT, "Este email já está registado.".to_string())
            }
            AppError::SelfDeletion => {
                (StatusCode::BAD_REQUEST, "Não pode excluir a própria conta.".to_string())
            }
            AppError::MissingIndex => {
                (StatusCode::BAD_REQUEST, "Índice da capacidade não fornecido.".to_string())
            }
            AppError::MissingTurma => {
                (StatusCode::BAD_REQUEST, "Selecione uma turma para o cronograma.".to_string())
            }
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.".to_string())
            }
            AppError::InvalidCredentials => {
                // Mensagem genérica, não revela se o email existe
                (StatusCode::UNAUTHORIZED, "Email ou senha inválidos.".to_string())
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.".to_string())
            }
            AppError::Unauthorized => (StatusCode::FORBIDDEN, "Acesso negado.".to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string()),
        };

        (status, Json(json!({ "error": user_message }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
