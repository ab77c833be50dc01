// src/web/mw_auth.rs
use crate::{
    error::AppError,
    web::session::{self, SessionUser, SessionView},
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Utilizador autenticado, posto nas extensões da requisição pelo middleware
#[derive(Clone, Debug)]
pub struct CurrentUser(pub SessionUser);

// Middleware das rotas do dono: sem login → flash + redirect para /login
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session::load_view(&session).await {
        SessionView::Authenticated(user) => {
            tracing::debug!("Autenticação MW: utilizador {} autenticado.", user.id);
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        SessionView::Anonymous => {
            tracing::debug!(
                "Autenticação MW: {} sem login. Redirecionando para /login",
                request.uri().path()
            );
            session::add_flash(&session, "Please login first").await?;
            Ok(Redirect::to("/login").into_response())
        }
    }
}
