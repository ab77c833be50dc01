// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, path::PathBuf, str::FromStr};

/// Configuração do servidor lida das variáveis de ambiente.
///
/// | Variável               | Omissão      |
/// |------------------------|--------------|
/// | `DATABASE_URL`         | obrigatória  |
/// | `HOST`                 | `127.0.0.1`  |
/// | `PORT`                 | `8000`       |
/// | `DB_MAX_CONNECTIONS`   | `5`          |
/// | `REQUEST_TIMEOUT_SECS` | `30`         |
/// | `SESSION_TTL_MINUTES`  | `120`        |
/// | `UPLOAD_DIR`           | `uploads`    |
/// | `PUBLIC_DIR`           | `public`     |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub request_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub upload_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL não definida".to_string()))?;

        Ok(Self {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_var("PORT", 8000)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            session_ttl_minutes: parse_var("SESSION_TTL_MINUTES", 120)?,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()).into(),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into()).into(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("valor inválido para {}: {}", key, e))),
        Err(_) => {
            tracing::debug!("{} não definida, usando valor por omissão", key);
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nomes exclusivos para não colidir com outros testes a correr em paralelo
    #[test]
    fn parse_var_uses_default_when_unset() {
        let value: u16 = parse_var("PORTFOLIO_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(value, 8000);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        env::set_var("PORTFOLIO_TEST_BAD_TIMEOUT", "trinta");
        let result: AppResult<u64> = parse_var("PORTFOLIO_TEST_BAD_TIMEOUT", 30);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn parse_var_reads_value() {
        env::set_var("PORTFOLIO_TEST_POOL", " 12 ");
        let value: u32 = parse_var("PORTFOLIO_TEST_POOL", 5).unwrap();
        assert_eq!(value, 12);
    }
}
