//! Workflow page and its script

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::presentation::{page, PageView};
use crate::AppState;

const WORKFLOW_JS: &str = include_str!("../../ui/workflow.js");

/// GET /
///
/// Renders the page from the current workflow state
pub async fn serve_page(State(state): State<AppState>) -> Html<String> {
    let workflow = state.session.snapshot().await;
    Html(page::render_page(&PageView::from_workflow(&workflow)))
}

/// GET /static/workflow.js
pub async fn serve_workflow_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        WORKFLOW_JS,
    )
        .into_response()
}
