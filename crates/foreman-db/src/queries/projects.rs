//! Database query functions for the `projects` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::Project;

/// Fields accepted when creating or updating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub lead_id: Option<i64>,
}

/// Insert a new project row. Returns the inserted project with
/// server-generated defaults (id, created_at).
pub async fn insert_project(pool: &PgPool, new: &NewProject) -> Result<Project> {
    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (name, description, lead_id) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.lead_id)
    .fetch_one(pool)
    .await
    .context("failed to insert project")?;

    Ok(project)
}

/// Fetch a project by its ID.
pub async fn get_project(pool: &PgPool, id: i64) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch project")?;

    Ok(project)
}

/// List all projects, ordered by creation time (newest first).
pub async fn list_projects(pool: &PgPool) -> Result<Vec<Project>> {
    let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
        .context("failed to list projects")?;

    Ok(projects)
}

/// Update a project in full. Returns the updated row, or `None` when no
/// project with that ID exists.
pub async fn update_project(pool: &PgPool, id: i64, new: &NewProject) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>(
        "UPDATE projects \
         SET name = $1, description = $2, lead_id = $3 \
         WHERE id = $4 \
         RETURNING *",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.lead_id)
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("failed to update project")?;

    Ok(project)
}

/// Delete a project. Returns `true` when a row was actually deleted.
///
/// Tasks belonging to the project go with it (ON DELETE CASCADE).
pub async fn delete_project(pool: &PgPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete project")?;

    Ok(result.rows_affected() > 0)
}
