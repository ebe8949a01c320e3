//! Pipeline orchestration: prompt -> generation -> recovery -> validation.

use thiserror::Error;
use tracing::{debug, info};

use crate::ollama::{GenerateError, TextGenerator};
use crate::plan::prompt::{PlanRequest, build_prompt};
use crate::plan::recover::extract_json;
use crate::plan::validate::{PlanParseError, ProjectPlan, parse_plan};

/// Errors from the end-to-end plan pipeline.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The generation call failed (unreachable server, non-2xx, bad envelope).
    #[error("plan generation failed: {0}")]
    Generation(#[from] GenerateError),

    /// The model's output did not yield a usable plan. Covers both decode
    /// failures and the empty plan produced by the recovery fallback.
    #[error("generated plan is unusable: {0}")]
    Plan(#[from] PlanParseError),
}

/// Run the full pipeline for one request.
///
/// Single synchronous flow per invocation: one outbound call, no retry, no
/// shared state between concurrent requests. The first failing stage aborts
/// the pipeline.
pub async fn generate_project_plan(
    generator: &dyn TextGenerator,
    request: &PlanRequest,
) -> Result<ProjectPlan, PlanError> {
    let prompt = build_prompt(request);
    debug!(
        backend = generator.name(),
        employees = request.employees.len(),
        prompt_chars = prompt.len(),
        "running plan pipeline"
    );

    let response = generator.generate(&prompt).await?;
    let candidate = extract_json(&response.content);
    let plan = parse_plan(&candidate)?;

    info!(
        tasks = plan.tasks.len(),
        timeline = %plan.timeline,
        "plan generated"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::ollama::GenerateResponse;

    /// Generator returning a canned response, recording nothing.
    struct CannedGenerator {
        content: String,
    }

    impl CannedGenerator {
        fn new(content: &str) -> Self {
            Self {
                content: content.to_string(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _prompt: &str) -> Result<GenerateResponse, GenerateError> {
            Ok(GenerateResponse {
                model: "canned".to_string(),
                content: self.content.clone(),
                done: true,
                created_at: None,
            })
        }
    }

    /// Generator that always fails at the transport layer.
    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<GenerateResponse, GenerateError> {
            Err(GenerateError::Server {
                status: 503,
                detail: "model not loaded".to_string(),
            })
        }
    }

    fn login_request() -> PlanRequest {
        PlanRequest {
            requirements: "Build a login page".to_string(),
            employees: vec!["Alice".to_string(), "Bob".to_string()],
        }
    }

    #[tokio::test]
    async fn fenced_response_yields_single_task_plan() {
        let generator = CannedGenerator::new(
            "Sure! ```json\n{\"tasks\":[{\"title\":\"Design UI\",\"description\":\"...\",\
             \"duration\":\"2d\",\"assignees\":[\"Alice\"]}],\"timeline\":\"1 week\"}\n```",
        );
        let plan = generate_project_plan(&generator, &login_request())
            .await
            .unwrap();
        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.tasks[0].title, "Design UI");
        assert_eq!(plan.tasks[0].assignees, vec!["Alice"]);
        assert_eq!(plan.timeline, "1 week");
    }

    #[tokio::test]
    async fn prose_only_response_fails_as_empty_plan() {
        // No JSON in the output: recovery falls back to `{}`, which the
        // validator rejects as empty rather than the recovery erroring.
        let generator = CannedGenerator::new("I'm sorry, I can't help with that.");
        let err = generate_project_plan(&generator, &login_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::Plan(PlanParseError::Empty)));
    }

    #[tokio::test]
    async fn garbled_json_fails_as_malformed() {
        let generator = CannedGenerator::new("{\"tasks\": [{\"title\": 42}]}");
        let err = generate_project_plan(&generator, &login_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::Plan(PlanParseError::Malformed(_))));
    }

    #[tokio::test]
    async fn generation_failure_aborts_pipeline() {
        let err = generate_project_plan(&FailingGenerator, &login_request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Generation(GenerateError::Server { status: 503, .. })
        ));
    }
}
