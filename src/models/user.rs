// src/models/user.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Papel do utilizador. Qualquer valor desconhecido vindo de fora é
// coagido para `User` (nunca rejeitado).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn from_str_coerce(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Contexto de pedido autenticado, construído pelo middleware de sessão
/// e passado explicitamente a todas as chamadas de serviço.
#[derive(Debug, Clone)]
pub struct Ctx {
    pub user_id: i64,
    pub role: Role,
}

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub active: bool,
    pub cargo: String,
    pub foto: Option<Vec<u8>>,
    pub created_at: Option<NaiveDateTime>,
}

// Projeção segura para respostas da API (sem password_hash nem foto)
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub cargo: String,
    pub created_at: Option<NaiveDateTime>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        UserDto {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            active: u.active,
            cargo: u.cargo,
            created_at: u.created_at,
        }
    }
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub cargo: Option<String>,
}

// Atualização parcial: apenas as chaves presentes são alteradas
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
    pub cargo: Option<String>,
}
