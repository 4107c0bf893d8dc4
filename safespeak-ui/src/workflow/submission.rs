//! Verification request lifecycle
//!
//! Idle → Submitting → Succeeded | Failed. A begun submission carries an id;
//! only the settlement with the matching id is applied.

use safespeak_common::api::VerificationResult;
use serde::Serialize;
use uuid::Uuid;

use super::intake::CandidateFile;

/// Fallback shown when a failure carries no description
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// Current submission lifecycle state
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing submitted, or a settled result was cleared
    #[default]
    Idle,
    /// Request in flight
    Submitting { submission_id: Uuid },
    /// Remote service returned a parseable verdict
    Succeeded { result: VerificationResult },
    /// Request failed; message is user-facing
    Failed { message: String },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    /// Succeeded or Failed
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. }
        )
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        match self {
            SubmissionState::Succeeded { result } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Handed to the request task when a submission begins
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub submission_id: Uuid,
    pub file: CandidateFile,
}

/// What a submit attempt did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// State is now Submitting; the ticket must be settled
    Started(SubmissionTicket),
    /// No valid file held; missing-file message surfaced
    MissingFile,
    /// A submission is already in flight; nothing changed
    AlreadySubmitting,
}

/// Normalise a failure description for display
pub fn failure_message(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}
