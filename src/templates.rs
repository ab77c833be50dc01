// src/templates.rs
use crate::{
    models::project::{Project, ProjectWithOwner},
    services::date_service,
    web::session::SessionView,
};
use askama::Template;

// Etiquetas oferecidas como checkbox nos formulários de projeto
pub const TECHNOLOGY_OPTIONS: &[&str] = &["Rust", "Go", "SQL", "JavaScript", "TypeScript", "React"];

// Cartão de projeto na página inicial
#[derive(Clone, Debug)]
pub struct ProjectCard {
    pub id: i64,
    pub project_name: String,
    pub duration: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
    pub owner_name: String,
}

impl From<ProjectWithOwner> for ProjectCard {
    fn from(row: ProjectWithOwner) -> Self {
        let p = row.project;
        ProjectCard {
            id: p.id,
            duration: date_service::compute_duration(p.start_date, p.end_date),
            project_name: p.project_name,
            description: p.description,
            technologies: p.technologies.0,
            image: p.image,
            owner_name: row.owner_name.unwrap_or_else(|| "-".to_string()),
        }
    }
}

// Projeto com datas já formatadas, para detalhe e edição
#[derive(Clone, Debug)]
pub struct ProjectView {
    pub id: i64,
    pub project_name: String,
    pub start_date_display: String,
    pub end_date_display: String,
    pub start_date_key: String,
    pub end_date_key: String,
    pub duration: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
}

impl ProjectView {
    pub fn has_technology(&self, tech: &str) -> bool {
        self.technologies.iter().any(|t| t == tech)
    }
}

impl From<Project> for ProjectView {
    fn from(p: Project) -> Self {
        ProjectView {
            id: p.id,
            start_date_display: date_service::to_display(p.start_date),
            end_date_display: date_service::to_display(p.end_date),
            start_date_key: date_service::to_storage_key(p.start_date),
            end_date_key: date_service::to_storage_key(p.end_date),
            duration: date_service::compute_duration(p.start_date, p.end_date),
            project_name: p.project_name,
            description: p.description,
            technologies: p.technologies.0,
            image: p.image,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub session: SessionView,
    pub flashes: Vec<String>,
    pub projects: Vec<ProjectCard>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactPage {
    pub session: SessionView,
}

// Formulário partilhado por "adicionar" e "editar"
#[derive(Template)]
#[template(path = "project_form.html")]
pub struct ProjectFormPage {
    pub session: SessionView,
    // None → novo projeto
    pub project: Option<ProjectView>,
    pub technology_options: &'static [&'static str],
}

impl ProjectFormPage {
    pub fn action(&self) -> String {
        match &self.project {
            Some(p) => format!("/edited-project/{}", p.id),
            None => "/project/addproject".to_string(),
        }
    }

    pub fn is_checked(&self, tech: &str) -> bool {
        self.project.as_ref().is_some_and(|p| p.has_technology(tech))
    }
}

#[derive(Template)]
#[template(path = "project_detail.html")]
pub struct ProjectDetailPage {
    pub session: SessionView,
    pub project: ProjectView,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub session: SessionView,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub session: SessionView,
    pub flashes: Vec<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status_code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::types::Json;

    fn project() -> Project {
        Project {
            id: 3,
            project_name: "Portfolio".into(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            description: "Site <pessoal>".into(),
            technologies: Json(vec!["Go".into(), "SQL".into()]),
            image: "uploads/p.png".into(),
            user_id: None,
        }
    }

    #[test]
    fn card_formats_duration_and_missing_owner() {
        let card = ProjectCard::from(ProjectWithOwner { project: project(), owner_name: None });
        assert_eq!(card.duration, "1 Month");
        assert_eq!(card.owner_name, "-");
    }

    #[test]
    fn view_formats_dates() {
        let view = ProjectView::from(project());
        assert_eq!(view.start_date_display, "01 January 2023");
        assert_eq!(view.end_date_key, "2023-03-01");
        assert!(view.has_technology("SQL"));
        assert!(!view.has_technology("Rust"));
    }

    #[test]
    fn detail_page_escapes_description() {
        let page = ProjectDetailPage { session: SessionView::Anonymous, project: project().into() };
        let html = page.render().unwrap();
        assert!(html.contains("Site &#60;pessoal&#62;") || html.contains("Site &lt;pessoal&gt;"));
        assert!(html.contains("01 January 2023"));
    }

    #[test]
    fn form_page_targets_add_or_edit() {
        let add = ProjectFormPage {
            session: SessionView::Anonymous,
            project: None,
            technology_options: TECHNOLOGY_OPTIONS,
        };
        assert_eq!(add.action(), "/project/addproject");
        assert!(!add.is_checked("Go"));

        let edit = ProjectFormPage { project: Some(project().into()), ..add };
        assert_eq!(edit.action(), "/edited-project/3");
        assert!(edit.is_checked("Go"));
        let html = edit.render().unwrap();
        assert!(html.contains("value=\"2023-01-01\""));
    }
}
