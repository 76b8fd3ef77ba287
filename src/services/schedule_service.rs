// src/services/schedule_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        schedule::{
            parse_completed_set, serialize_completed_set, toggle_index, SchedulePayload,
            ScheduleWithTurma,
        },
        user::Ctx,
    },
};
use sqlx::SqlitePool;

// As respostas incluem sempre nome/cor da turma via JOIN na leitura
const SELECT_WITH_TURMA: &str = "SELECT s.id, s.turma_id, t.nome AS turma_nome, \
    t.cor AS turma_cor, s.semana, s.atividades, s.unidade_curricular, s.capacidades, \
    s.conhecimentos, s.recursos, s.completed, s.capacidades_completed \
    FROM schedules s JOIN turmas t ON s.turma_id = t.id";

/// Lista os cronogramas do utilizador, opcionalmente filtrados por turma,
/// ordenados por número de semana.
pub async fn list_schedules(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    turma_filter: Option<i64>,
) -> AppResult<Vec<ScheduleWithTurma>> {
    tracing::debug!("Listando cronogramas do user {} (turma: {:?})", ctx.user_id, turma_filter);

    let rows = match turma_filter {
        Some(turma_id) => {
            sqlx::query_as::<_, ScheduleWithTurma>(&format!(
                "{SELECT_WITH_TURMA} WHERE s.user_id = ? AND s.turma_id = ? ORDER BY s.semana ASC"
            ))
            .bind(ctx.user_id)
            .bind(turma_id)
            .fetch_all(db_pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ScheduleWithTurma>(&format!(
                "{SELECT_WITH_TURMA} WHERE s.user_id = ? ORDER BY s.semana ASC"
            ))
            .bind(ctx.user_id)
            .fetch_all(db_pool)
            .await?
        }
    };
    Ok(rows)
}

/// Busca um cronograma dentro do âmbito de posse do utilizador.
pub async fn get_schedule(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    schedule_id: i64,
) -> AppResult<ScheduleWithTurma> {
    sqlx::query_as::<_, ScheduleWithTurma>(&format!(
        "{SELECT_WITH_TURMA} WHERE s.id = ? AND s.user_id = ?"
    ))
    .bind(schedule_id)
    .bind(ctx.user_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Cria uma semana numa turma. Sem `semana` no payload, o número é
/// `max(semanas da turma) + 1` (1 numa turma vazia).
pub async fn create_schedule(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    payload: &SchedulePayload,
) -> AppResult<ScheduleWithTurma> {
    let turma_id = payload.turma_id.ok_or(AppError::MissingTurma)?;

    let mut tx = db_pool.begin().await?;

    // A turma tem de estar ativa e pertencer ao utilizador
    let turma_ok: Option<i64> =
        sqlx::query_scalar("SELECT id FROM turmas WHERE id = ? AND user_id = ? AND active = 1")
            .bind(turma_id)
            .bind(ctx.user_id)
            .fetch_optional(&mut *tx)
            .await?;
    if turma_ok.is_none() {
        tracing::warn!("Turma {} inexistente/inativa para user {}.", turma_id, ctx.user_id);
        return Err(AppError::NotFound);
    }

    let semana = match payload.semana {
        Some(s) => s,
        None => {
            // Auto-incremento calculado só dentro desta turma
            let max: i64 = sqlx::query_scalar(
                "SELECT COALESCE(MAX(semana), 0) FROM schedules WHERE turma_id = ?",
            )
            .bind(turma_id)
            .fetch_one(&mut *tx)
            .await?;
            max + 1
        }
    };

    let new_id = sqlx::query(
        "INSERT INTO schedules (user_id, turma_id, semana, atividades, unidade_curricular, \
         capacidades, conhecimentos, recursos) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(ctx.user_id)
    .bind(turma_id)
    .bind(semana)
    .bind(payload.atividades.as_deref().unwrap_or(""))
    .bind(payload.unidade_curricular.as_deref().unwrap_or(""))
    .bind(payload.capacidades.as_deref().unwrap_or(""))
    .bind(payload.conhecimentos.as_deref().unwrap_or(""))
    .bind(payload.recursos.as_deref().unwrap_or(""))
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Semana {} criada (id={}) na turma {}.", semana, new_id, turma_id);

    get_schedule(db_pool, ctx, new_id).await
}

/// Edição de conteúdo: só os campos de texto são mutáveis por esta via
/// (nem semana, nem turma, nem flags de conclusão).
pub async fn update_schedule(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    schedule_id: i64,
    payload: &SchedulePayload,
) -> AppResult<ScheduleWithTurma> {
    let current = get_schedule(db_pool, ctx, schedule_id).await?;

    sqlx::query(
        "UPDATE schedules SET atividades = ?, unidade_curricular = ?, capacidades = ?, \
         conhecimentos = ?, recursos = ? WHERE id = ? AND user_id = ?",
    )
    .bind(payload.atividades.clone().unwrap_or(current.atividades))
    .bind(payload.unidade_curricular.clone().unwrap_or(current.unidade_curricular))
    .bind(payload.capacidades.clone().unwrap_or(current.capacidades))
    .bind(payload.conhecimentos.clone().unwrap_or(current.conhecimentos))
    .bind(payload.recursos.clone().unwrap_or(current.recursos))
    .bind(schedule_id)
    .bind(ctx.user_id)
    .execute(db_pool)
    .await?;

    tracing::info!("✅ Cronograma {} atualizado pelo user {}.", schedule_id, ctx.user_id);
    get_schedule(db_pool, ctx, schedule_id).await
}

/// Remove uma semana (folha, sem cascades necessários).
pub async fn delete_schedule(db_pool: &SqlitePool, ctx: &Ctx, schedule_id: i64) -> AppResult<()> {
    let rows_affected = sqlx::query("DELETE FROM schedules WHERE id = ? AND user_id = ?")
        .bind(schedule_id)
        .bind(ctx.user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        Err(AppError::NotFound)
    } else {
        tracing::info!("🗑️ Cronograma {} excluído pelo user {}.", schedule_id, ctx.user_id);
        Ok(())
    }
}

/// Alterna a conclusão da semana inteira. Aplicado duas vezes volta ao
/// estado original.
pub async fn toggle_week_complete(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    schedule_id: i64,
) -> AppResult<bool> {
    let mut tx = db_pool.begin().await?;

    let completed: Option<bool> =
        sqlx::query_scalar("SELECT completed FROM schedules WHERE id = ? AND user_id = ?")
            .bind(schedule_id)
            .bind(ctx.user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let completed = completed.ok_or(AppError::NotFound)?;

    let new_value = !completed;
    sqlx::query("UPDATE schedules SET completed = ? WHERE id = ? AND user_id = ?")
        .bind(new_value)
        .bind(schedule_id)
        .bind(ctx.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::debug!("Semana {} marcada como completed={}.", schedule_id, new_value);
    Ok(new_value)
}

/// Alterna a conclusão de UMA capacidade pelo seu índice. O índice não é
/// validado contra o comprimento atual da lista (ver nota no modelo); a
/// pertença é comparada pela forma de string.
pub async fn toggle_capability(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    schedule_id: i64,
    index: &str,
) -> AppResult<String> {
    let mut tx = db_pool.begin().await?;

    let raw: Option<String> = sqlx::query_scalar(
        "SELECT capacidades_completed FROM schedules WHERE id = ? AND user_id = ?",
    )
    .bind(schedule_id)
    .bind(ctx.user_id)
    .fetch_optional(&mut *tx)
    .await?;
    let raw = raw.ok_or(AppError::NotFound)?;

    let mut set = parse_completed_set(&raw);
    toggle_index(&mut set, index);
    let new_raw = serialize_completed_set(&set);

    sqlx::query("UPDATE schedules SET capacidades_completed = ? WHERE id = ? AND user_id = ?")
        .bind(&new_raw)
        .bind(schedule_id)
        .bind(ctx.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::debug!("Capacidade {} alternada no cronograma {}: '{}'", index, schedule_id, new_raw);
    Ok(new_raw)
}
