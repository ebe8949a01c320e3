//! Database query functions for the `employees` table and the
//! employee/project membership join table.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::{AssignedTask, Employee, EmployeeWithTasks, TaskStatus};

/// Insert a new employee row.
pub async fn insert_employee(pool: &PgPool, name: &str) -> Result<Employee> {
    let employee = sqlx::query_as::<_, Employee>(
        "INSERT INTO employees (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .context("failed to insert employee")?;

    Ok(employee)
}

/// List every employee together with their assigned tasks.
///
/// Single LEFT JOIN, folded into one entry per employee. Employees with no
/// assigned tasks appear with an empty task list.
pub async fn list_employees_with_tasks(pool: &PgPool) -> Result<Vec<EmployeeWithTasks>> {
    let rows: Vec<(i64, String, Option<i64>, Option<String>, Option<TaskStatus>)> = sqlx::query_as(
        "SELECT e.id, e.name, t.id, t.title, t.status \
         FROM employees e \
         LEFT JOIN tasks t ON e.id = t.assigned_to \
         ORDER BY e.id, t.id",
    )
    .fetch_all(pool)
    .await
    .context("failed to list employees with tasks")?;

    // BTreeMap keeps the ORDER BY e.id ordering in the output.
    let mut by_employee: BTreeMap<i64, EmployeeWithTasks> = BTreeMap::new();
    for (emp_id, emp_name, task_id, task_title, task_status) in rows {
        let entry = by_employee.entry(emp_id).or_insert_with(|| EmployeeWithTasks {
            id: emp_id,
            name: emp_name,
            tasks: Vec::new(),
        });
        if let (Some(id), Some(title), Some(status)) = (task_id, task_title, task_status) {
            entry.tasks.push(AssignedTask { id, title, status });
        }
    }

    Ok(by_employee.into_values().collect())
}

/// Add an employee to a project's roster. Idempotent: assigning twice is
/// not an error (ON CONFLICT DO NOTHING).
pub async fn assign_to_project(pool: &PgPool, employee_id: i64, project_id: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO employee_projects (employee_id, project_id) \
         VALUES ($1, $2) \
         ON CONFLICT DO NOTHING",
    )
    .bind(employee_id)
    .bind(project_id)
    .execute(pool)
    .await
    .context("failed to assign employee to project")?;

    Ok(())
}

/// Remove an employee from a project's roster. Returns `false` when the
/// employee was not assigned to the project.
pub async fn remove_from_project(pool: &PgPool, employee_id: i64, project_id: i64) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM employee_projects \
         WHERE employee_id = $1 AND project_id = $2",
    )
    .bind(employee_id)
    .bind(project_id)
    .execute(pool)
    .await
    .context("failed to remove employee from project")?;

    Ok(result.rows_affected() > 0)
}
