// src/models/project.rs
use crate::{
    error::{AppError, AppResult},
    services::date_service,
};
use chrono::NaiveDate;
use sqlx::{types::Json, FromRow};

// Representa um projeto lido da tabela 'projects'
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate, // end_date >= start_date NÃO é garantido
    pub description: String,
    pub technologies: Json<Vec<String>>, // Coluna TEXT com array JSON
    pub image: String,                   // Caminho relativo (ex: "uploads/<uuid>.png")
    pub user_id: Option<i64>,            // Referência fraca ao criador
}

// Linha da listagem: projeto + nome do dono (LEFT JOIN, pode faltar)
#[derive(Debug, Clone, FromRow)]
pub struct ProjectWithOwner {
    #[sqlx(flatten)]
    pub project: Project,
    pub owner_name: Option<String>,
}

/// Campos já validados, prontos para INSERT ou UPDATE (substituição total).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub project_name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub technologies: Vec<String>,
    pub image: String,
}

// Campos de texto do formulário de projeto, tal como chegam do browser
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub project_name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub technologies: Vec<String>, // Campo multi-valor, pela ordem recebida
    // Só no formulário de edição: imagem atual, usada quando não há novo ficheiro
    pub current_image: Option<String>,
}

impl ProjectForm {
    /// Valida o formulário e junta-lhe o caminho da imagem.
    /// As datas são verificadas aqui, antes de chegar à base de dados.
    pub fn validate(self, image: String) -> AppResult<NewProject> {
        let project_name = self.project_name.trim().to_string();
        if project_name.is_empty() {
            return Err(AppError::Validation("o nome do projeto é obrigatório".to_string()));
        }
        let start_date = date_service::parse_storage_key(&self.start_date)
            .map_err(|_| AppError::Validation(format!("data de início inválida: '{}'", self.start_date)))?;
        let end_date = date_service::parse_storage_key(&self.end_date)
            .map_err(|_| AppError::Validation(format!("data de fim inválida: '{}'", self.end_date)))?;
        if image.trim().is_empty() {
            return Err(AppError::Validation("a imagem do projeto é obrigatória".to_string()));
        }

        let technologies = self
            .technologies
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(NewProject {
            project_name,
            description: self.description.trim().to_string(),
            start_date,
            end_date,
            technologies,
            image,
        })
    }
}
