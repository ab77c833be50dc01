// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, RegisterForm},
    services::{auth_service, user_service},
    state::AppState,
    templates::{LoginPage, RegisterPage},
    web::{render, session::{self, SessionView}},
};
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /register
pub async fn show_register_form(session: Session) -> AppResult<Response> {
    if session::load_view(&session).await.is_logged_in() {
        tracing::debug!("GET /register: utilizador já logado, redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }
    Ok(render(&RegisterPage { session: SessionView::Anonymous, error: None })?.into_response())
}

// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de registo para: {}", form.email);

    let result = match form.validate() {
        Ok(()) => user_service::register(&state.db_pool, &form.name, &form.email, &form.password).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => {
            session::add_flash(&session, "Registration successful, please login").await?;
            Ok(Redirect::to("/login").into_response())
        }
        // Erros de validação (incl. email repetido) voltam ao formulário
        Err(AppError::Validation(msg)) => {
            tracing::warn!("Registo rejeitado para {}: {}", form.email, msg);
            let page = RegisterPage { session: SessionView::Anonymous, error: Some(msg) };
            Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /login
pub async fn show_login_form(session: Session) -> AppResult<Response> {
    if session::load_view(&session).await.is_logged_in() {
        tracing::debug!("GET /login: utilizador já logado, redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }
    let page = LoginPage {
        session: SessionView::Anonymous,
        flashes: session::take_flashes(&session).await,
        error: None,
    };
    Ok(render(&page)?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.email);

    match auth_service::authenticate(&state.db_pool, &form.email, &form.password).await {
        Ok(user) => {
            session::sign_in(&session, &user).await?;
            session::add_flash(&session, "Successfully Login !!!").await?;
            tracing::info!("✅ Login bem-sucedido para: {}", user.email);
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::InvalidCredentials) => {
            // Mensagem genérica: não revela se o email existe
            let page = LoginPage {
                session: SessionView::Anonymous,
                flashes: Vec::new(),
                error: Some("Invalid email or password".to_string()),
            };
            Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    if let SessionView::Authenticated(user) = session::load_view(&session).await {
        tracing::info!("🚪 Utilizador '{}' desligado.", user.id);
    } else {
        tracing::info!("🚪 Sessão anónima desligada.");
    }
    session::sign_out(&session).await?;
    Ok(Redirect::to("/"))
}
