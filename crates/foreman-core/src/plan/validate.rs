//! Decoding and validation of recovered plan JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One task in a generated plan.
///
/// Assignees are expected to be a subset of the requested roster and
/// dependencies are expected to name other task titles in the same plan,
/// but neither is enforced: the model's output is taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// A structured project plan derived from model free text.
///
/// Valid iff it contains at least one task. No other structural invariant
/// is enforced: duplicate titles, unknown assignees, dangling or
/// self-referential dependencies all pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    #[serde(default)]
    pub tasks: Vec<GeneratedTask>,
    #[serde(default)]
    pub timeline: String,
}

/// Errors from decoding a candidate plan string.
#[derive(Debug, Error)]
pub enum PlanParseError {
    /// The candidate is not valid JSON, or has fields of the wrong type.
    #[error("malformed plan JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The candidate decoded cleanly but contains zero tasks. This is also
    /// where the recovery stage's `{}` fallback lands.
    #[error("plan contains no tasks")]
    Empty,
}

/// Decode a candidate string into a [`ProjectPlan`], rejecting empty plans.
pub fn parse_plan(candidate: &str) -> Result<ProjectPlan, PlanParseError> {
    let plan: ProjectPlan = serde_json::from_str(candidate)?;
    if plan.tasks.is_empty() {
        return Err(PlanParseError::Empty);
    }
    Ok(plan)
}
