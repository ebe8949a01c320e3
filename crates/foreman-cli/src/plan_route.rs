//! Handler for `POST /api/project/plan`: the LLM plan pipeline endpoint.

use axum::Json;
use axum::extract::State;

use foreman_core::plan::{PlanRequest, ProjectPlan, generate_project_plan};

use crate::serve_cmd::{AppError, AppState};

/// Forward the requirements and roster through the plan pipeline.
///
/// Malformed inbound JSON is rejected by the `Json` extractor (4xx) before
/// this handler runs. Pipeline failures all map to 500 via
/// `AppError::from::<PlanError>`.
pub async fn create_project_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<ProjectPlan>, AppError> {
    tracing::info!(
        employees = request.employees.len(),
        requirements_chars = request.requirements.len(),
        "plan requested"
    );
    let plan = generate_project_plan(state.generator.as_ref(), &request).await?;
    Ok(Json(plan))
}
