// src/web/project_handlers.rs
use crate::{
    error::AppResult,
    services::project_service,
    state::AppState,
    templates::{ProjectDetailPage, ProjectFormPage, TECHNOLOGY_OPTIONS},
    web::{mw_auth::CurrentUser, render, session, upload},
};
use axum::{
    extract::{Extension, Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;

// GET /project - formulário de novo projeto (protegido)
pub async fn show_add_form(session: Session) -> AppResult<impl IntoResponse> {
    render(&ProjectFormPage {
        session: session::load_view(&session).await,
        project: None,
        technology_options: TECHNOLOGY_OPTIONS,
    })
}

// POST /project/addproject (multipart)
pub async fn handle_add(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let upload = upload::read_project_form(multipart).await?;
    let image = upload.image_path()?.unwrap_or_default();
    let pending = upload.image;
    let project = upload.form.validate(image)?;

    // A imagem só vai para disco depois de o formulário ser válido
    if let Some(image) = &pending {
        image.save(&state.config.upload_dir).await?;
    }
    let id = match project_service::create(&state.db_pool, &project, user.id).await {
        Ok(id) => id,
        Err(e) => {
            if let Some(image) = &pending {
                image.discard(&state.config.upload_dir).await;
            }
            return Err(e);
        }
    };
    tracing::info!("POST /project/addproject: projeto {} criado por {}", id, user.id);

    session::add_flash(&session, format!("Project '{}' added", project.project_name)).await?;
    Ok(Redirect::to("/"))
}

// GET /project-detail/{id} e /project-details/{id}
pub async fn show_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let project = project_service::get_by_id(&state.db_pool, id).await?;
    render(&ProjectDetailPage {
        session: session::load_view(&session).await,
        project: project.into(),
    })
}

// GET /edit-project/{id} - formulário preenchido (protegido)
pub async fn show_edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    session: Session,
) -> AppResult<impl IntoResponse> {
    let project = project_service::get_by_id(&state.db_pool, id).await?;
    render(&ProjectFormPage {
        session: session::load_view(&session).await,
        project: Some(project.into()),
        technology_options: TECHNOLOGY_OPTIONS,
    })
}

// POST /edited-project/{id} (multipart) - substitui todos os campos
pub async fn handle_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let upload = upload::read_project_form(multipart).await?;
    let image = upload.image_path()?.unwrap_or_default();
    let pending = upload.image;
    let project = upload.form.validate(image)?;

    if let Some(image) = &pending {
        image.save(&state.config.upload_dir).await?;
    }
    // ID inexistente → 404, e o ficheiro novo não fica órfão
    if let Err(e) = project_service::update(&state.db_pool, id, &project).await {
        if let Some(image) = &pending {
            image.discard(&state.config.upload_dir).await;
        }
        return Err(e);
    }
    tracing::info!("POST /edited-project/{}: atualizado por {}", id, user.id);

    session::add_flash(&session, format!("Project '{}' updated", project.project_name)).await?;
    Ok(Redirect::to("/"))
}

// GET /delete-project/{id} (protegido)
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
) -> AppResult<Redirect> {
    // ID inexistente → 404 (apagar não é idempotente)
    project_service::delete_by_id(&state.db_pool, id).await?;
    tracing::info!("GET /delete-project/{}: apagado por {}", id, user.id);

    session::add_flash(&session, "Project deleted").await?;
    Ok(Redirect::to("/"))
}
