use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskStatus {
    type Err = TaskStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(TaskStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`TaskStatus`] string.
#[derive(Debug, Clone, Error)]
#[error("invalid task status: {0:?}")]
pub struct TaskStatusParseError(pub String);

// ---------------------------------------------------------------------------
// Row models
// ---------------------------------------------------------------------------

/// A row in the `employees` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A row in the `projects` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub lead_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A row in the `tasks` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// An employee together with every task currently assigned to them.
///
/// Not a table row; assembled from a LEFT JOIN so employees with no tasks
/// still appear (with an empty task list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeWithTasks {
    pub id: i64,
    pub name: String,
    pub tasks: Vec<AssignedTask>,
}

/// Minimal task view carried inside [`EmployeeWithTasks`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedTask {
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_round_trips() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            let s = status.to_string();
            assert_eq!(s.parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn task_status_rejects_unknown() {
        let err = "COMPLETED".parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains("COMPLETED"));
    }

    #[test]
    fn task_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
