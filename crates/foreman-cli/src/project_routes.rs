//! Handlers for the `/api/projects` routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use foreman_db::models::{Project, Task};
use foreman_db::queries::{projects, tasks};

use crate::serve_cmd::{AppError, AppState};

/// Inbound body for create and update.
#[derive(Debug, Deserialize)]
pub struct ProjectBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lead_id: Option<i64>,
}

impl From<ProjectBody> for projects::NewProject {
    fn from(body: ProjectBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            lead_id: body.lead_id,
        }
    }
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<ProjectBody>,
) -> Result<Json<Project>, AppError> {
    let project = projects::insert_project(&state.pool, &body.into())
        .await
        .map_err(AppError::internal)?;
    tracing::info!(id = project.id, name = %project.name, "project created");
    Ok(Json(project))
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let list = projects::list_projects(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(list))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let project = projects::get_project(&state.pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("project {id} not found")))?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ProjectBody>,
) -> Result<Json<Project>, AppError> {
    let project = projects::update_project(&state.pool, id, &body.into())
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("project {id} not found")))?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = projects::delete_project(&state.pool, id)
        .await
        .map_err(AppError::internal)?;
    if !deleted {
        return Err(AppError::not_found(format!("project {id} not found")));
    }
    tracing::info!(id, "project deleted");
    Ok(StatusCode::OK)
}

pub async fn get_project_tasks(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Task>>, AppError> {
    let list = tasks::list_tasks_for_project(&state.pool, id)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(list))
}
