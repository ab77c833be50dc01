// src/services/project_service.rs
use crate::{
    error::{AppError, AppResult},
    models::project::{NewProject, Project, ProjectWithOwner},
};
use sqlx::{types::Json, SqlitePool};

// Cada função executa exatamente uma instrução SQL, sem transações

/// Lista todos os projetos com o nome do dono (LEFT JOIN: dono em falta fica a NULL).
pub async fn list_all_with_owner(db_pool: &SqlitePool) -> AppResult<Vec<ProjectWithOwner>> {
    tracing::debug!("Buscando todos os projetos...");
    let projects = sqlx::query_as::<_, ProjectWithOwner>(
        r#"
        SELECT
            p.id,
            p.project_name,
            p.start_date,
            p.end_date,
            p.description,
            p.technologies,
            p.image,
            p.user_id,
            u.name AS owner_name
        FROM projects p
        LEFT JOIN users u ON p.user_id = u.id
        ORDER BY p.id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    tracing::debug!("Encontrados {} projetos.", projects.len());
    Ok(projects)
}

pub async fn get_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Project> {
    tracing::debug!("Buscando projeto por ID: {}", id);
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, project_name, start_date, end_date, description, technologies, image, user_id
        FROM projects
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Projeto {}", id)))
}

/// Insere um projeto completo e devolve o ID atribuído pela DB.
/// `user_id` tem de vir de uma sessão autenticada (garantido pela camada web).
pub async fn create(db_pool: &SqlitePool, project: &NewProject, user_id: i64) -> AppResult<i64> {
    tracing::info!("Criando projeto '{}' para user {}", project.project_name, user_id);
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO projects (project_name, start_date, end_date, description, technologies, image, user_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        RETURNING id
        "#,
    )
    .bind(&project.project_name)
    .bind(project.start_date)
    .bind(project.end_date)
    .bind(&project.description)
    .bind(Json(&project.technologies))
    .bind(&project.image)
    .bind(user_id)
    .fetch_one(db_pool)
    .await?;

    tracing::info!("✅ Projeto {} criado.", id);
    Ok(id)
}

/// Substitui todos os campos editáveis. Sem controlo de concorrência: ganha a última escrita.
pub async fn update(db_pool: &SqlitePool, id: i64, project: &NewProject) -> AppResult<()> {
    tracing::info!("Atualizando projeto {}", id);
    let rows_affected = sqlx::query(
        r#"
        UPDATE projects
        SET project_name = ?1, description = ?2, start_date = ?3, end_date = ?4,
            technologies = ?5, image = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&project.project_name)
    .bind(&project.description)
    .bind(project.start_date)
    .bind(project.end_date)
    .bind(Json(&project.technologies))
    .bind(&project.image)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao atualizar: projeto {} não existe.", id);
        return Err(AppError::NotFound(format!("Projeto {}", id)));
    }
    Ok(())
}

/// Apaga um projeto. Apagar um ID inexistente devolve `NotFound`.
pub async fn delete_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    tracing::info!("Apagando projeto {}", id);
    let rows_affected = sqlx::query("DELETE FROM projects WHERE id = ?1")
        .bind(id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao apagar: projeto {} não existe.", id);
        return Err(AppError::NotFound(format!("Projeto {}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, services::{date_service, user_service}};
    use chrono::NaiveDate;

    fn date(raw: &str) -> NaiveDate {
        date_service::parse_storage_key(raw).unwrap()
    }

    fn portfolio(end: &str) -> NewProject {
        NewProject {
            project_name: "Portfolio".to_string(),
            description: "Site pessoal".to_string(),
            start_date: date("2023-01-01"),
            end_date: date(end),
            technologies: vec!["Go".to_string(), "SQL".to_string()],
            image: "uploads/portfolio.png".to_string(),
        }
    }

    async fn owner(pool: &SqlitePool) -> i64 {
        user_service::insert_user(pool, "Ana", "ana@example.com", "hash-de-teste")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let pool = test_pool().await;
        let user_id = owner(&pool).await;
        let input = portfolio("2023-03-01");

        let id = create(&pool, &input, user_id).await.unwrap();
        let stored = get_by_id(&pool, id).await.unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.project_name, input.project_name);
        assert_eq!(stored.description, input.description);
        assert_eq!(stored.start_date, input.start_date);
        assert_eq!(stored.end_date, input.end_date);
        assert_eq!(stored.technologies.0, input.technologies);
        assert_eq!(stored.image, input.image);
        assert_eq!(stored.user_id, Some(user_id));
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let pool = test_pool().await;
        let user_id = owner(&pool).await;
        let id = create(&pool, &portfolio("2023-03-01"), user_id).await.unwrap();

        let replacement = NewProject {
            project_name: "Portfolio v2".to_string(),
            description: "Reescrito".to_string(),
            start_date: date("2023-02-01"),
            end_date: date("2023-02-10"),
            technologies: vec!["Rust".to_string()],
            image: "uploads/v2.png".to_string(),
        };
        update(&pool, id, &replacement).await.unwrap();

        let stored = get_by_id(&pool, id).await.unwrap();
        assert_eq!(stored.project_name, "Portfolio v2");
        assert_eq!(stored.description, "Reescrito");
        assert_eq!(stored.start_date, date("2023-02-01"));
        assert_eq!(stored.end_date, date("2023-02-10"));
        assert_eq!(stored.technologies.0, vec!["Rust".to_string()]);
        assert_eq!(stored.image, "uploads/v2.png");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let pool = test_pool().await;
        let user_id = owner(&pool).await;
        let id = create(&pool, &portfolio("2023-03-01"), user_id).await.unwrap();

        delete_by_id(&pool, id).await.unwrap();
        assert!(matches!(get_by_id(&pool, id).await, Err(AppError::NotFound(_))));
        // Segunda remoção do mesmo ID já não encontra nada
        assert!(matches!(delete_by_id(&pool, id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_of_missing_project_is_not_found() {
        let pool = test_pool().await;
        let result = update(&pool, 999, &portfolio("2023-03-01")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn listing_keeps_projects_without_owner() {
        let pool = test_pool().await;
        let user_id = owner(&pool).await;
        create(&pool, &portfolio("2023-03-01"), user_id).await.unwrap();

        // Projeto órfão: user_id sem utilizador correspondente
        sqlx::query("PRAGMA foreign_keys = OFF").execute(&pool).await.unwrap();
        sqlx::query(
            "INSERT INTO projects (project_name, start_date, end_date, description, technologies, image, user_id)
             VALUES ('Orfao', '2023-01-01', '2023-01-02', '', '[]', 'uploads/x.png', 42)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let listed = list_all_with_owner(&pool).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].owner_name.as_deref(), Some("Ana"));
        assert_eq!(listed[1].project.project_name, "Orfao");
        assert_eq!(listed[1].owner_name, None);
    }

    #[tokio::test]
    async fn portfolio_lifecycle_scenario() {
        let pool = test_pool().await;
        let user_id = owner(&pool).await;

        // 59 dias → 1 Month
        let id = create(&pool, &portfolio("2023-03-01"), user_id).await.unwrap();
        let stored = get_by_id(&pool, id).await.unwrap();
        assert_eq!(date_service::compute_duration(stored.start_date, stored.end_date), "1 Month");

        // 90 dias → 3 Months
        update(&pool, id, &portfolio("2023-04-01")).await.unwrap();
        let stored = get_by_id(&pool, id).await.unwrap();
        assert_eq!(date_service::compute_duration(stored.start_date, stored.end_date), "3 Months");

        delete_by_id(&pool, id).await.unwrap();
        assert!(matches!(get_by_id(&pool, id).await, Err(AppError::NotFound(_))));
    }
}
