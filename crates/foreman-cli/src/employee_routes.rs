//! Handlers for the `/api/employees` routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use foreman_db::models::EmployeeWithTasks;
use foreman_db::queries::{employees, tasks};

use crate::serve_cmd::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct MembershipBody {
    pub employee_id: i64,
    pub project_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AssignTaskBody {
    pub task_id: i64,
    pub employee_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompleteTaskBody {
    pub task_id: i64,
}

pub async fn get_employee_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeWithTasks>>, AppError> {
    let list = employees::list_employees_with_tasks(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(list))
}

pub async fn assign_to_project(
    State(state): State<AppState>,
    Json(body): Json<MembershipBody>,
) -> Result<StatusCode, AppError> {
    employees::assign_to_project(&state.pool, body.employee_id, body.project_id)
        .await
        .map_err(AppError::internal)?;
    Ok(StatusCode::OK)
}

pub async fn remove_from_project(
    State(state): State<AppState>,
    Json(body): Json<MembershipBody>,
) -> Result<StatusCode, AppError> {
    let removed = employees::remove_from_project(&state.pool, body.employee_id, body.project_id)
        .await
        .map_err(AppError::internal)?;
    if !removed {
        return Err(AppError::not_found("employee not assigned to project"));
    }
    Ok(StatusCode::OK)
}

pub async fn assign_task(
    State(state): State<AppState>,
    Json(body): Json<AssignTaskBody>,
) -> Result<StatusCode, AppError> {
    let updated = tasks::assign_task(&state.pool, body.task_id, body.employee_id)
        .await
        .map_err(AppError::internal)?;
    if !updated {
        return Err(AppError::not_found(format!(
            "task {} not found",
            body.task_id
        )));
    }
    Ok(StatusCode::OK)
}

pub async fn complete_task(
    State(state): State<AppState>,
    Json(body): Json<CompleteTaskBody>,
) -> Result<StatusCode, AppError> {
    let updated = tasks::complete_task(&state.pool, body.task_id)
        .await
        .map_err(AppError::internal)?;
    if !updated {
        return Err(AppError::not_found(format!(
            "task {} not found",
            body.task_id
        )));
    }
    Ok(StatusCode::OK)
}
