// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::auth_service,
};
use sqlx::SqlitePool;

/// Regista um utilizador. A senha é convertida em hash antes de tocar na DB.
pub async fn register(
    db_pool: &SqlitePool,
    name: &str,
    email: &str,
    raw_password: &str,
) -> AppResult<i64> {
    tracing::info!("Tentando registar utilizador: {}", email);
    let password_hash = auth_service::hash_password(raw_password).await?;
    let id = insert_user(db_pool, name.trim(), email.trim(), &password_hash).await?;
    tracing::info!("✅ Utilizador '{}' registado com ID {}.", email, id);
    Ok(id)
}

/// INSERT simples; a unicidade do email vem do esquema (UNIQUE), não da aplicação.
pub(crate) async fn insert_user(
    db_pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> AppResult<i64> {
    let result = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES (?1, ?2, ?3)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db_pool)
    .await;

    match result {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Falha ao registar: email '{}' já existe.", email);
            Err(AppError::Validation("email já registado".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Busca um utilizador pelo email (a chave de login).
pub async fn find_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<User> {
    tracing::debug!("Buscando utilizador por email: {}", email);
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(email.trim())
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Utilizador '{}'", email)))
}
