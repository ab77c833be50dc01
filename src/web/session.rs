// src/web/session.rs
use crate::{error::AppResult, models::user::User};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flash";

// Dados do utilizador autenticado guardados na sessão
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
}

/// Estado de login visto pelos handlers e templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionView {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl SessionView {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionView::Authenticated(_))
    }

    pub fn user_name(&self) -> &str {
        match self {
            SessionView::Authenticated(user) => &user.name,
            SessionView::Anonymous => "",
        }
    }
}

/// Lê o estado de login. Dados que não descodificam contam como anónimo.
pub async fn load_view(session: &Session) -> SessionView {
    match session.get::<SessionUser>(USER_KEY).await {
        Ok(Some(user)) => SessionView::Authenticated(user),
        Ok(None) => SessionView::Anonymous,
        Err(e) => {
            tracing::warn!("Sessão com dados inválidos, tratada como anónima: {}", e);
            SessionView::Anonymous
        }
    }
}

pub async fn sign_in(session: &Session, user: &User) -> AppResult<()> {
    // Novo ID de sessão no login
    session.cycle_id().await?;
    let session_user = SessionUser { id: user.id, name: user.name.clone() };
    session.insert(USER_KEY, session_user).await?;
    Ok(())
}

pub async fn sign_out(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

pub async fn add_flash(session: &Session, message: impl Into<String>) -> AppResult<()> {
    let mut flashes: Vec<String> = session.get(FLASH_KEY).await.ok().flatten().unwrap_or_default();
    flashes.push(message.into());
    session.insert(FLASH_KEY, flashes).await?;
    Ok(())
}

/// Devolve e remove as mensagens flash (só aparecem uma vez).
pub async fn take_flashes(session: &Session) -> Vec<String> {
    match session.remove::<Vec<String>>(FLASH_KEY).await {
        Ok(flashes) => flashes.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Mensagens flash ilegíveis, descartadas: {}", e);
            Vec::new()
        }
    }
}
