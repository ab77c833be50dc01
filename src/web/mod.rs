// src/web/mod.rs
pub mod auth_handlers;
pub mod mw_auth;
pub mod page_handlers;
pub mod project_handlers;
pub mod routes;
pub mod session;
pub mod upload;

use crate::error::AppResult;
use askama::Template;
use axum::response::Html;

// Renderiza um template Askama; falhas viram AppError::Template
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}
