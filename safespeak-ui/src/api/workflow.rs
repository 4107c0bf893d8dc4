//! Workflow event endpoints
//!
//! Each browser event maps to one workflow transition, then redirects back
//! to the page (303) so a reload never repeats the action.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::workflow::{FileSelection, ModalViewState, SubmissionState, ValidationError};
use crate::AppState;

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// POST /intake
///
/// Browse or drop upload. The first part carrying a file name is the
/// selection; a request without one selects "no file". An upload over
/// [`MAX_UPLOAD_BYTES`] is rejected into the workflow like an invalid file.
pub async fn intake(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Redirect> {
    match read_selection(multipart).await {
        Ok(selection) => {
            state.session.select_file(selection).await;
        }
        Err(ApiError::PayloadTooLarge(detail)) => {
            warn!(%detail, limit = MAX_UPLOAD_BYTES, "Upload exceeds intake limit");
            state.session.reject_upload(ValidationError::too_large()).await;
        }
        Err(e) => return Err(e),
    }
    Ok(Redirect::to("/"))
}

async fn read_selection(mut multipart: Multipart) -> ApiResult<Option<FileSelection>> {
    while let Some(field) = multipart.next_field().await? {
        // Browsers send an empty-named part when the picker was cancelled
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let media_type = field.content_type().map(str::to_string);
        let content = field.bytes().await?;

        debug!(
            file = %file_name,
            media_type = ?media_type,
            bytes = content.len(),
            "Received file selection"
        );
        return Ok(Some(FileSelection {
            name: file_name,
            media_type,
            content,
        }));
    }
    Ok(None)
}

/// POST /submit
///
/// The request task runs detached; the page hears about settlement over SSE.
pub async fn submit(State(state): State<AppState>) -> Redirect {
    let _request_task = state.session.submit().await;
    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
pub struct ModalOpenForm {
    pub image: String,
}

/// POST /modal/open
pub async fn open_modal(
    State(state): State<AppState>,
    Form(form): Form<ModalOpenForm>,
) -> Redirect {
    state.session.open_modal(&form.image).await;
    Redirect::to("/")
}

/// POST /modal/close
///
/// Dismiss button and backdrop click both land here.
pub async fn close_modal(State(state): State<AppState>) -> Redirect {
    state.session.close_modal().await;
    Redirect::to("/")
}

/// Snapshot of the workflow for scripts and diagnostics
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub phrase: Option<String>,
    pub file_name: Option<String>,
    pub validation_error: Option<String>,
    pub can_submit: bool,
    pub submission: SubmissionState,
    pub modal: ModalViewState,
}

/// GET /api/state
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let workflow = state.session.snapshot().await;

    Json(StateResponse {
        phrase: workflow.phrase().map(str::to_string),
        file_name: workflow.candidate().map(|f| f.name().to_string()),
        validation_error: workflow.validation_error().map(|e| e.message().to_string()),
        can_submit: workflow.can_submit(),
        submission: workflow.submission().clone(),
        modal: workflow.modal().clone(),
    })
}

/// Build workflow routes
pub fn workflow_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/intake",
            post(intake).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/submit", post(submit))
        .route("/modal/open", post(open_modal))
        .route("/modal/close", post(close_modal))
        .route("/api/state", get(get_state))
}
