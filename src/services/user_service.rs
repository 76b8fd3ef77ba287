// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUserPayload, Ctx, Role, UpdateUserPayload, User},
    services::auth_service,
};
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, active, cargo, foto, created_at";

/// Busca um utilizador pelo seu ID (usado pelo middleware de sessão).
pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por ID: {}", user_id);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Autentica por email + senha. Só utilizadores ATIVOS conseguem entrar;
/// contas desativadas falham mesmo com credenciais corretas.
pub async fn verify_credentials(
    db_pool: &SqlitePool,
    email: &str,
    password: &str,
) -> AppResult<Option<User>> {
    tracing::debug!("Tentativa de autenticação para email: {}", email);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND active = 1"
    ))
    .bind(email)
    .fetch_optional(db_pool)
    .await?;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!("Utilizador ativo não encontrado para: {}", email);
            return Ok(None);
        }
    };

    if auth_service::verify_password(password, &user.password_hash).await? {
        Ok(Some(user))
    } else {
        tracing::warn!("Senha incorreta para: {}", email);
        Ok(None)
    }
}

/// Busca todos os utilizadores (para o painel de admin).
pub async fn list_users(db_pool: &SqlitePool) -> AppResult<Vec<User>> {
    tracing::debug!("Buscando todos os utilizadores...");
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"
    ))
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontrados {} utilizadores.", users.len());
    Ok(users)
}

/// Cria um utilizador. O email é único (comparação exata sobre o valor
/// guardado); roles desconhecidas são coagidas para 'user'.
pub async fn create_user(db_pool: &SqlitePool, payload: &CreateUserPayload) -> AppResult<i64> {
    tracing::info!("Tentando criar utilizador: {}", payload.email);

    let role = Role::from_str_coerce(payload.role.as_deref().unwrap_or("user"));
    let password_hash = auth_service::hash_password(&payload.password).await?;
    let cargo = payload.cargo.clone().unwrap_or_default();

    let mut tx = db_pool.begin().await?;

    // Pré-validação da unicidade do email (a constraint UNIQUE do esquema
    // fica como rede de segurança)
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        tracing::warn!("Falha ao criar user: email '{}' já existe.", payload.email);
        tx.rollback().await?;
        return Err(AppError::DuplicateEmail);
    }

    let insert_result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, role, cargo) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(role.as_str())
    .bind(&cargo)
    .execute(&mut *tx)
    .await;

    // Constraint UNIQUE violada numa corrida entre a pré-validação e o INSERT
    if let Err(sqlx::Error::Database(db_err)) = &insert_result {
        if db_err.code().map_or(false, |c| c == "19" || c == "2067" || c == "1555") {
            tx.rollback().await?;
            return Err(AppError::DuplicateEmail);
        }
    }
    let new_id = insert_result?.last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Utilizador '{}' criado com sucesso (id={}).", payload.email, new_id);
    Ok(new_id)
}

/// Atualização parcial: só as chaves presentes são alteradas. A unicidade
/// do email só é revalidada quando o email muda; a senha só é trocada se
/// uma nova senha não vazia for fornecida.
pub async fn update_user(
    db_pool: &SqlitePool,
    user_id: i64,
    payload: &UpdateUserPayload,
) -> AppResult<()> {
    tracing::info!("Atualizando dados para user: {}", user_id);

    let mut tx = db_pool.begin().await?;

    let current = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound)?;

    let name = payload.name.clone().unwrap_or(current.name);
    let cargo = payload.cargo.clone().unwrap_or(current.cargo);
    let active = payload.active.unwrap_or(current.active);

    let email = payload.email.clone().unwrap_or(current.email.clone());
    if email != current.email {
        let taken: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = ? AND id != ?")
                .bind(&email)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if taken.is_some() {
            tracing::warn!("Falha ao atualizar user {}: email '{}' já existe.", user_id, email);
            tx.rollback().await?;
            return Err(AppError::DuplicateEmail);
        }
    }

    // Role só muda para um valor reconhecido; valores desconhecidos
    // deixam a role guardada como está (a coerção é só na criação)
    let role = match payload.role.as_deref() {
        Some(r @ ("user" | "admin")) => r.to_string(),
        _ => current.role,
    };

    // Senha só muda com um valor novo não vazio
    let password_hash = match payload.password.as_deref() {
        Some(p) if !p.is_empty() => auth_service::hash_password(p).await?,
        _ => current.password_hash,
    };

    sqlx::query(
        "UPDATE users SET name = ?, email = ?, password_hash = ?, role = ?, active = ?, cargo = ? WHERE id = ?",
    )
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(&role)
    .bind(active)
    .bind(&cargo)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Dados atualizados com sucesso para user: {}", user_id);
    Ok(())
}

/// Remove um utilizador. O admin não pode apagar a própria conta; os
/// cascades do esquema removem as turmas e cronogramas do utilizador.
pub async fn delete_user(db_pool: &SqlitePool, ctx: &Ctx, user_id: i64) -> AppResult<()> {
    if ctx.user_id == user_id {
        tracing::warn!("User {} tentou excluir a própria conta.", ctx.user_id);
        return Err(AppError::SelfDeletion);
    }

    let rows_affected = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao excluir: utilizador '{}' não encontrado.", user_id);
        Err(AppError::NotFound)
    } else {
        tracing::info!("🗑️ Utilizador '{}' excluído (turmas e cronogramas em cascade).", user_id);
        Ok(())
    }
}
