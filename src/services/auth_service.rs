// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::user_service,
};
use sqlx::SqlitePool;
use tokio::sync::OnceCell;

// Custo bcrypt fixo, não configurável
pub const PASSWORD_HASH_COST: u32 = 10;

// Hash usado quando o email não existe, para o login demorar o mesmo tempo
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> AppResult<&'static str> {
    DUMMY_HASH
        .get_or_try_init(|| hash_password("dummy-password-never-matches"))
        .await
        .map(String::as_str)
}

/// Verifica se a senha fornecida corresponde ao hash guardado.
/// A comparação é feita pelo `bcrypt::verify`, em tempo constante.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt (com salt) para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt...");
        bcrypt::hash(&password, PASSWORD_HASH_COST)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Valida email + senha. Email desconhecido e senha errada dão o mesmo erro.
pub async fn authenticate(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<User> {
    let user = match user_service::find_by_email(db_pool, email).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            tracing::warn!("Login: email não registado: {}", email);
            verify_password(password, dummy_hash().await?).await?;
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if verify_password(password, &user.password_hash).await? {
        Ok(user)
    } else {
        tracing::warn!("Login: senha incorreta para {}", email);
        Err(AppError::InvalidCredentials)
    }
}
