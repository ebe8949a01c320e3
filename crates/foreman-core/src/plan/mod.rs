//! Project-plan pipeline: prompt construction, JSON recovery, validation.
//!
//! Straight-line flow with no retry loop and no intermediate state:
//! prompt -> generation -> recovery -> validation. A failure at any stage
//! aborts and reports to the caller without partial output.

pub mod prompt;
pub mod recover;
pub mod service;
pub mod validate;

pub use prompt::{PlanRequest, build_prompt};
pub use recover::extract_json;
pub use service::{PlanError, generate_project_plan};
pub use validate::{GeneratedTask, PlanParseError, ProjectPlan, parse_plan};
