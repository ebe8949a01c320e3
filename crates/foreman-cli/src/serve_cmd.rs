use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use foreman_core::ollama::TextGenerator;
use foreman_core::plan::{PlanError, PlanParseError};

use crate::employee_routes;
use crate::plan_route;
use crate::project_routes;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State handed to every handler: the connection pool and the generation
/// backend. Both are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub generator: Arc<dyn TextGenerator>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl From<PlanError> for AppError {
    /// Every pipeline failure maps to 500; the message distinguishes the
    /// stage for the caller.
    fn from(err: PlanError) -> Self {
        let message = match &err {
            PlanError::Generation(_) => "failed to generate project plan",
            PlanError::Plan(PlanParseError::Malformed(_)) => "failed to parse project plan",
            PlanError::Plan(PlanParseError::Empty) => "no tasks generated in project plan",
        };
        tracing::error!(error = %err, "plan pipeline failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/employees/tasks",
            get(employee_routes::get_employee_tasks),
        )
        .route(
            "/api/employees/assign-project",
            post(employee_routes::assign_to_project),
        )
        .route(
            "/api/employees/remove-from-project",
            post(employee_routes::remove_from_project),
        )
        .route(
            "/api/employees/assign-task",
            post(employee_routes::assign_task),
        )
        .route(
            "/api/employees/complete-task",
            post(employee_routes::complete_task),
        )
        .route(
            "/api/projects",
            post(project_routes::create_project).get(project_routes::list_projects),
        )
        .route(
            "/api/projects/{id}",
            get(project_routes::get_project)
                .put(project_routes::update_project)
                .delete(project_routes::delete_project),
        )
        .route(
            "/api/projects/{id}/tasks",
            get(project_routes::get_project_tasks),
        )
        .route("/api/project/plan", post(plan_route::create_project_plan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("foreman serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // A failed handler install also resolves the shutdown future, so the
    // server drains and the error is reported here instead of panicking
    // inside the signal task.
    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();
    let signal_task = tokio::spawn(async move {
        let result = tokio::signal::ctrl_c()
            .await
            .context("failed to install Ctrl+C handler");
        let _ = signal_tx.send(());
        result
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = signal_rx.await;
        })
        .await?;

    signal_task.await.context("signal task panicked")??;
    tracing::info!("foreman serve shut down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
