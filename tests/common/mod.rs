// tests/common/mod.rs
use aula_planner::models::{
    schedule::SchedulePayload,
    turma::TurmaPayload,
    user::{CreateUserPayload, Ctx, Role},
};
use aula_planner::services::user_service;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Pool em memória com o esquema migrado e FKs ativas (uma conexão só,
/// para que todas as queries vejam a mesma base em memória).
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn payload_user(name: &str, email: &str, role: Option<&str>) -> CreateUserPayload {
    CreateUserPayload {
        name: name.to_string(),
        email: email.to_string(),
        password: "segredo123".to_string(),
        role: role.map(str::to_string),
        cargo: None,
    }
}

pub async fn create_test_user(pool: &SqlitePool, email: &str, role: &str) -> Ctx {
    let id = user_service::create_user(pool, &payload_user("Professor Teste", email, Some(role)))
        .await
        .unwrap();
    Ctx {
        user_id: id,
        role: Role::from_str_coerce(role),
    }
}

pub fn payload_turma(nome: &str) -> TurmaPayload {
    TurmaPayload {
        nome: Some(nome.to_string()),
        ..Default::default()
    }
}

pub fn payload_semana(turma_id: Option<i64>, capacidades: &str) -> SchedulePayload {
    SchedulePayload {
        turma_id,
        capacidades: Some(capacidades.to_string()),
        ..Default::default()
    }
}
