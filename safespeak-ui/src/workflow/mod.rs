//! Verification workflow state machine
//!
//! One [`Workflow`] value holds everything the page renders: the candidate
//! file, the validation message, the challenge phrase, the submission state
//! and the zoom modal. Every method applies one user or network event in
//! full; callers serialize access (see [`crate::session`]).
//!
//! Invariants:
//! - a submission begins only with a valid file held and none in flight
//! - any file selection clears a settled result or failure, including one
//!   that settles after the selection was made
//! - a settlement applies only to the submission it belongs to

pub mod intake;
pub mod modal;
pub mod submission;

pub use intake::{CandidateFile, FileSelection, ValidationError};
pub use modal::ModalViewState;
pub use submission::{SubmissionState, SubmissionTicket, SubmitOutcome};

use safespeak_common::api::VerificationResult;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Workflow {
    candidate: Option<CandidateFile>,
    validation_error: Option<ValidationError>,
    phrase: Option<String>,
    submission: SubmissionState,
    /// A selection was made while the current submission was in flight
    selected_in_flight: bool,
    modal: ModalViewState,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate(&self) -> Option<&CandidateFile> {
        self.candidate.as_ref()
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    pub fn phrase(&self) -> Option<&str> {
        self.phrase.as_deref()
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn modal(&self) -> &ModalViewState {
        &self.modal
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.candidate.is_some() && !self.submission.is_submitting()
    }

    /// Apply a browse or drop selection
    ///
    /// Returns true when the selection was accepted.
    pub fn select_file(&mut self, selection: Option<FileSelection>) -> bool {
        self.apply_selection(intake::validate_selection(selection))
    }

    /// Reject an upload that never became a [`FileSelection`]
    ///
    /// Same effect as an invalid selection: the held file is dropped and
    /// `error` is shown.
    pub fn reject_upload(&mut self, error: ValidationError) {
        self.apply_selection(Err(error));
    }

    fn apply_selection(&mut self, validated: Result<CandidateFile, ValidationError>) -> bool {
        // A new selection invalidates whatever the previous file produced
        if self.submission.is_settled() {
            debug!("Clearing settled submission on new file selection");
            self.submission = SubmissionState::Idle;
        } else if self.submission.is_submitting() {
            self.selected_in_flight = true;
        }

        match validated {
            Ok(file) => {
                info!(file = %file.name(), bytes = file.size_bytes(), "Audio file accepted");
                self.validation_error = None;
                self.candidate = Some(file);
                true
            }
            Err(err) => {
                info!(reason = %err, "Audio file rejected");
                self.validation_error = Some(err);
                self.candidate = None;
                false
            }
        }
    }

    /// Store the challenge phrase once fetched
    pub fn set_phrase(&mut self, phrase: String) {
        self.phrase = Some(phrase);
    }

    /// Start a submission if the preconditions hold
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.submission.is_submitting() {
            debug!("Submit ignored: submission already in flight");
            return SubmitOutcome::AlreadySubmitting;
        }

        let Some(file) = self.candidate.clone() else {
            self.validation_error = Some(ValidationError::missing_file());
            return SubmitOutcome::MissingFile;
        };

        let submission_id = Uuid::new_v4();
        self.validation_error = None;
        self.submission = SubmissionState::Submitting { submission_id };
        self.selected_in_flight = false;

        info!(%submission_id, file = %file.name(), "Submission started");
        SubmitOutcome::Started(SubmissionTicket {
            submission_id,
            file,
        })
    }

    /// Settle the in-flight submission
    ///
    /// `Err` carries the user-facing failure description. Returns false when
    /// `submission_id` is not the submission in flight.
    pub fn settle(
        &mut self,
        submission_id: Uuid,
        outcome: Result<VerificationResult, String>,
    ) -> bool {
        match &self.submission {
            SubmissionState::Submitting { submission_id: current } if *current == submission_id => {}
            other => {
                warn!(%submission_id, state = ?other, "Ignoring settlement for unknown submission");
                return false;
            }
        }

        if std::mem::take(&mut self.selected_in_flight) {
            // The selection made meanwhile owns the page; its file and message stay
            info!(
                %submission_id,
                succeeded = outcome.is_ok(),
                "Discarding submission outcome: file selection changed while in flight"
            );
            self.submission = SubmissionState::Idle;
            return true;
        }

        self.submission = match outcome {
            Ok(result) => {
                info!(%submission_id, verdict = %result.verdict, "Submission succeeded");
                // The verdict belongs to this file; a new one must be chosen
                self.candidate = None;
                SubmissionState::Succeeded { result }
            }
            Err(description) => {
                let message = submission::failure_message(&description);
                warn!(%submission_id, %message, "Submission failed");
                SubmissionState::Failed { message }
            }
        };
        true
    }

    /// Open the zoom modal on one of the rendered plots
    ///
    /// Returns false (and stays unchanged) when `image` is not a plot of the
    /// current result.
    pub fn open_modal(&mut self, image: &str) -> bool {
        let rendered = self
            .submission
            .result()
            .map(|result| result.has_plot_locator(image))
            .unwrap_or(false);

        if !rendered {
            debug!(%image, "Modal open ignored: image is not a rendered plot");
            return false;
        }

        self.modal.open(image);
        true
    }

    /// Returns true when the modal was open
    pub fn close_modal(&mut self) -> bool {
        let was_open = self.modal.is_open();
        self.modal.close();
        was_open
    }
}
