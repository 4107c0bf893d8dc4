//! safespeak-ui library interface
//!
//! Hosts the voice verification workflow: file intake, challenge phrase,
//! submission lifecycle and result presentation, served as a local web page.

pub mod api;
pub mod error;
pub mod presentation;
pub mod services;
pub mod session;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};
pub use crate::session::WorkflowSession;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The single live workflow session
    pub session: WorkflowSession,
}

impl AppState {
    pub fn new(session: WorkflowSession) -> Self {
        Self { session }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // Page and static assets
        .route("/", get(api::serve_page))
        .route("/static/workflow.js", get(api::serve_workflow_js))
        // Workflow events
        .merge(api::workflow_routes())
        .route("/events", get(api::event_stream))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
