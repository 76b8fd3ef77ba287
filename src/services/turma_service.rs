// src/services/turma_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        turma::{apply_date_field, Turma, TurmaPayload},
        user::Ctx,
    },
};
use sqlx::SqlitePool;

const TURMA_COLUMNS: &str = "id, user_id, nome, descricao, cor, carga_horaria, dias_aula, \
                             hora_inicio, hora_fim, data_inicio, data_fim, active";

/// Lista as turmas ativas do utilizador, ordenadas por nome.
pub async fn list_turmas(db_pool: &SqlitePool, ctx: &Ctx) -> AppResult<Vec<Turma>> {
    tracing::debug!("Listando turmas ativas do user {}", ctx.user_id);
    let turmas = sqlx::query_as::<_, Turma>(&format!(
        "SELECT {TURMA_COLUMNS} FROM turmas WHERE user_id = ? AND active = 1 ORDER BY nome ASC"
    ))
    .bind(ctx.user_id)
    .fetch_all(db_pool)
    .await?;
    Ok(turmas)
}

/// Busca uma turma do utilizador, ativa ou não (edição e exportação
/// continuam a funcionar sobre turmas desativadas).
pub async fn find_turma(db_pool: &SqlitePool, ctx: &Ctx, turma_id: i64) -> AppResult<Option<Turma>> {
    let turma = sqlx::query_as::<_, Turma>(&format!(
        "SELECT {TURMA_COLUMNS} FROM turmas WHERE id = ? AND user_id = ?"
    ))
    .bind(turma_id)
    .bind(ctx.user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(turma)
}

/// Cria uma turma. O nome é obrigatório (após trim); datas malformadas
/// são ignoradas em silêncio e os restantes campos assumem defaults.
pub async fn create_turma(db_pool: &SqlitePool, ctx: &Ctx, payload: &TurmaPayload) -> AppResult<Turma> {
    let nome = payload.nome.as_deref().unwrap_or("").trim().to_string();
    if nome.is_empty() {
        return Err(AppError::ValidationError(
            "O nome da turma é obrigatório.".to_string(),
        ));
    }

    let data_inicio = apply_date_field(None, payload.data_inicio.as_deref());
    let data_fim = apply_date_field(None, payload.data_fim.as_deref());

    let new_id = sqlx::query(
        "INSERT INTO turmas (user_id, nome, descricao, cor, carga_horaria, dias_aula, \
         hora_inicio, hora_fim, data_inicio, data_fim) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(ctx.user_id)
    .bind(&nome)
    .bind(payload.descricao.as_deref().unwrap_or(""))
    .bind(payload.cor.as_deref().unwrap_or(""))
    .bind(payload.carga_horaria.unwrap_or(0))
    .bind(payload.dias_aula.as_deref().unwrap_or(""))
    .bind(payload.hora_inicio.as_deref().unwrap_or(""))
    .bind(payload.hora_fim.as_deref().unwrap_or(""))
    .bind(&data_inicio)
    .bind(&data_fim)
    .execute(db_pool)
    .await?
    .last_insert_rowid();

    tracing::info!("✅ Turma '{}' criada (id={}) para user {}.", nome, new_id, ctx.user_id);

    find_turma(db_pool, ctx, new_id)
        .await?
        .ok_or(AppError::InternalServerError)
}

/// Atualização parcial: só as chaves presentes são sobrescritas. Data
/// explícita "" limpa o campo; data malformada mantém o valor anterior.
pub async fn update_turma(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    turma_id: i64,
    payload: &TurmaPayload,
) -> AppResult<Turma> {
    let current = find_turma(db_pool, ctx, turma_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let nome = match payload.nome.as_deref() {
        Some(n) => {
            let n = n.trim().to_string();
            if n.is_empty() {
                return Err(AppError::ValidationError(
                    "O nome da turma é obrigatório.".to_string(),
                ));
            }
            n
        }
        None => current.nome,
    };

    let data_inicio = apply_date_field(current.data_inicio, payload.data_inicio.as_deref());
    let data_fim = apply_date_field(current.data_fim, payload.data_fim.as_deref());

    sqlx::query(
        "UPDATE turmas SET nome = ?, descricao = ?, cor = ?, carga_horaria = ?, dias_aula = ?, \
         hora_inicio = ?, hora_fim = ?, data_inicio = ?, data_fim = ? WHERE id = ? AND user_id = ?",
    )
    .bind(&nome)
    .bind(payload.descricao.clone().unwrap_or(current.descricao))
    .bind(payload.cor.clone().unwrap_or(current.cor))
    .bind(payload.carga_horaria.unwrap_or(current.carga_horaria))
    .bind(payload.dias_aula.clone().unwrap_or(current.dias_aula))
    .bind(payload.hora_inicio.clone().unwrap_or(current.hora_inicio))
    .bind(payload.hora_fim.clone().unwrap_or(current.hora_fim))
    .bind(&data_inicio)
    .bind(&data_fim)
    .bind(turma_id)
    .bind(ctx.user_id)
    .execute(db_pool)
    .await?;

    tracing::info!("✅ Turma {} atualizada pelo user {}.", turma_id, ctx.user_id);

    find_turma(db_pool, ctx, turma_id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Soft-delete: marca a turma como inativa. Os cronogramas que a
/// referenciam não são tocados (continuam acessíveis por lookup direto).
pub async fn soft_delete_turma(db_pool: &SqlitePool, ctx: &Ctx, turma_id: i64) -> AppResult<()> {
    let rows_affected = sqlx::query("UPDATE turmas SET active = 0 WHERE id = ? AND user_id = ?")
        .bind(turma_id)
        .bind(ctx.user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Soft-delete falhou: turma {} não pertence ao user {}.", turma_id, ctx.user_id);
        Err(AppError::NotFound)
    } else {
        tracing::info!("🗑️ Turma {} desativada pelo user {}.", turma_id, ctx.user_id);
        Ok(())
    }
}
