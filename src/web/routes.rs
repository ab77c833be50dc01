// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, mw_auth, page_handlers, project_handlers, upload::UPLOAD_URL_PREFIX},
};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

// Limite do corpo dos formulários com imagem
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(page_handlers::home))
        .route("/contact", get(page_handlers::contact))
        .route("/project-detail/{id}", get(project_handlers::show_detail))
        .route("/project-details/{id}", get(project_handlers::show_detail))
        .route("/register", get(auth_handlers::show_register_form).post(auth_handlers::handle_register))
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout));

    // --- Rotas do Dono --- (exigem login)
    let owner_routes = Router::new()
        .route("/project", get(project_handlers::show_add_form))
        .route("/project/addproject", post(project_handlers::handle_add))
        .route("/edit-project/{id}", get(project_handlers::show_edit_form))
        .route("/edited-project/{id}", post(project_handlers::handle_edit))
        .route("/delete-project/{id}", get(project_handlers::handle_delete))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .route_layer(middleware::from_fn(mw_auth::require_auth));

    // --- Ficheiros estáticos ---
    let config = app_state.config.clone();

    Router::new()
        .merge(public_routes)
        .merge(owner_routes)
        .nest_service(&format!("/{}", UPLOAD_URL_PREFIX), ServeDir::new(&config.upload_dir))
        .nest_service("/public", ServeDir::new(&config.public_dir))
        .with_state(app_state)
}

/// Router completo com as camadas de produção (trace, timeout, sessões).
pub fn build_app<S>(app_state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let config = app_state.config.clone();

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(config.session_ttl_minutes)));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs),
            ))
            .layer(session_layer),
    )
}
