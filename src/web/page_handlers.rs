// src/web/page_handlers.rs
use crate::{
    error::AppResult,
    services::project_service,
    templates::{ContactPage, IndexPage, ProjectCard},
    web::{render, session},
};
use axum::{extract::State, response::IntoResponse};
use sqlx::SqlitePool;
use tower_sessions::Session;

// GET / - lista de projetos com duração e dono
pub async fn home(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let projects = project_service::list_all_with_owner(&db_pool)
        .await?
        .into_iter()
        .map(ProjectCard::from)
        .collect();

    let page = IndexPage {
        session: session::load_view(&session).await,
        flashes: session::take_flashes(&session).await,
        projects,
    };
    render(&page)
}

// GET /contact
pub async fn contact(session: Session) -> AppResult<impl IntoResponse> {
    render(&ContactPage { session: session::load_view(&session).await })
}
