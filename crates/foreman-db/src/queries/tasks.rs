//! Database query functions for the `tasks` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::{Task, TaskStatus};

/// Fields accepted when creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<i64>,
}

/// Insert a new task row. Returns the inserted task with server-generated
/// defaults (id, status, created_at).
pub async fn insert_task(pool: &PgPool, new: &NewTask) -> Result<Task> {
    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (project_id, title, description, assigned_to) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(new.project_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.assigned_to)
    .fetch_one(pool)
    .await
    .context("failed to insert task")?;

    Ok(task)
}

/// Fetch a task by its ID.
pub async fn get_task(pool: &PgPool, id: i64) -> Result<Option<Task>> {
    let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch task")?;

    Ok(task)
}

/// List all tasks belonging to a project, oldest first.
pub async fn list_tasks_for_project(pool: &PgPool, project_id: i64) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE project_id = $1 ORDER BY created_at, id",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
    .context("failed to list tasks for project")?;

    Ok(tasks)
}

/// Assign a task to an employee. Returns `false` when the task does not
/// exist.
pub async fn assign_task(pool: &PgPool, task_id: i64, employee_id: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE tasks SET assigned_to = $1 WHERE id = $2")
        .bind(employee_id)
        .bind(task_id)
        .execute(pool)
        .await
        .context("failed to assign task")?;

    Ok(result.rows_affected() > 0)
}

/// Mark a task completed. Returns `false` when the task does not exist.
pub async fn complete_task(pool: &PgPool, task_id: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE tasks SET status = $1 WHERE id = $2")
        .bind(TaskStatus::Completed)
        .bind(task_id)
        .execute(pool)
        .await
        .context("failed to complete task")?;

    Ok(result.rows_affected() > 0)
}
