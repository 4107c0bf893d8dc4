//! Workflow session: the single live workflow plus its remote collaborators
//!
//! Each user event takes the write lock once and applies its whole
//! transition. The lock is never held across the two suspension points
//! (phrase fetch, verification request), so the page keeps rendering and the
//! modal keeps working while a submission is outstanding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use safespeak_common::events::{EventBus, WorkflowEvent};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::services::{PhraseClient, VerificationClient};
use crate::workflow::{FileSelection, SubmissionTicket, SubmitOutcome, ValidationError, Workflow};

/// Shared handle to the workflow session
#[derive(Clone)]
pub struct WorkflowSession {
    workflow: Arc<RwLock<Workflow>>,
    phrase_client: Arc<PhraseClient>,
    verification_client: Arc<VerificationClient>,
    event_bus: EventBus,
    activated: Arc<AtomicBool>,
}

impl WorkflowSession {
    pub fn new(
        phrase_client: PhraseClient,
        verification_client: VerificationClient,
        event_bus: EventBus,
    ) -> Self {
        Self {
            workflow: Arc::new(RwLock::new(Workflow::new())),
            phrase_client: Arc::new(phrase_client),
            verification_client: Arc::new(verification_client),
            event_bus,
            activated: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Copy of the current workflow for rendering
    pub async fn snapshot(&self) -> Workflow {
        self.workflow.read().await.clone()
    }

    /// Activate the workflow: start the one challenge phrase fetch
    ///
    /// Only the first call spawns the fetch; later calls return `None`.
    pub fn activate(&self) -> Option<JoinHandle<()>> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return None;
        }

        info!(url = %self.phrase_client.url(), "Workflow activated, fetching challenge phrase");
        let session = self.clone();
        Some(tokio::spawn(async move {
            session.fetch_phrase().await;
        }))
    }

    async fn fetch_phrase(&self) {
        match self.phrase_client.fetch_phrase().await {
            Ok(phrase) => {
                self.workflow.write().await.set_phrase(phrase.clone());
                self.event_bus.emit_lossy(WorkflowEvent::PhraseLoaded {
                    phrase,
                    timestamp: Utc::now(),
                });
            }
            Err(e) => {
                // Advisory only: no phrase is shown, nothing else changes
                warn!("Failed to load phrase: {}", e);
            }
        }
    }

    /// Browse or drop selection; returns true when accepted
    pub async fn select_file(&self, selection: Option<FileSelection>) -> bool {
        let file_name = selection.as_ref().map(|s| s.name.clone());
        let accepted = self.workflow.write().await.select_file(selection);

        self.event_bus.emit_lossy(WorkflowEvent::FileSelected {
            accepted,
            file_name,
            timestamp: Utc::now(),
        });
        accepted
    }

    /// Upload that could not be read as a selection (e.g. over the size limit)
    pub async fn reject_upload(&self, error: ValidationError) {
        self.workflow.write().await.reject_upload(error);

        self.event_bus.emit_lossy(WorkflowEvent::FileSelected {
            accepted: false,
            file_name: None,
            timestamp: Utc::now(),
        });
    }

    /// Apply the submit event without waiting for the request
    ///
    /// A [`SubmitOutcome::Started`] ticket must be passed to
    /// [`complete_submission`](Self::complete_submission).
    pub async fn begin_submission(&self) -> SubmitOutcome {
        let outcome = self.workflow.write().await.begin_submit();

        if let SubmitOutcome::Started(ticket) = &outcome {
            self.event_bus.emit_lossy(WorkflowEvent::SubmissionStarted {
                submission_id: ticket.submission_id,
                timestamp: Utc::now(),
            });
        }
        outcome
    }

    /// Issue the verification request for `ticket` and settle it
    pub async fn complete_submission(&self, ticket: SubmissionTicket) {
        let outcome = self
            .verification_client
            .verify(&ticket.file)
            .await
            .map_err(|e| e.user_message());
        let succeeded = outcome.is_ok();

        let applied = self.workflow.write().await.settle(ticket.submission_id, outcome);

        if applied {
            self.event_bus.emit_lossy(WorkflowEvent::SubmissionSettled {
                submission_id: ticket.submission_id,
                succeeded,
                timestamp: Utc::now(),
            });
        }
    }

    /// Submit event: begin, then run the request on its own task
    ///
    /// Returns the request task when a submission started. Dropping the
    /// handle detaches the task; it still settles.
    pub async fn submit(&self) -> Option<JoinHandle<()>> {
        match self.begin_submission().await {
            SubmitOutcome::Started(ticket) => {
                let session = self.clone();
                Some(tokio::spawn(async move {
                    session.complete_submission(ticket).await;
                }))
            }
            SubmitOutcome::MissingFile | SubmitOutcome::AlreadySubmitting => None,
        }
    }

    /// Returns true when the modal opened
    pub async fn open_modal(&self, image: &str) -> bool {
        let opened = self.workflow.write().await.open_modal(image);
        if opened {
            self.event_bus.emit_lossy(WorkflowEvent::ModalChanged {
                open: true,
                timestamp: Utc::now(),
            });
        }
        opened
    }

    /// Returns true when the modal was open
    pub async fn close_modal(&self) -> bool {
        let closed = self.workflow.write().await.close_modal();
        if closed {
            self.event_bus.emit_lossy(WorkflowEvent::ModalChanged {
                open: false,
                timestamp: Utc::now(),
            });
        }
        closed
    }
}
