//! Workflow event types and the broadcast bus that carries them
//!
//! Events are emitted after each workflow transition and streamed to the
//! page over SSE so a waiting browser can re-render once a submission settles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Workflow event
///
/// Serialized with a `type` tag for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowEvent {
    /// Challenge phrase fetch resolved with a phrase
    PhraseLoaded {
        phrase: String,
        timestamp: DateTime<Utc>,
    },

    /// A file was browsed or dropped
    FileSelected {
        /// False when validation rejected the selection
        accepted: bool,
        file_name: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// Verification request issued
    SubmissionStarted {
        submission_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Verification request settled
    SubmissionSettled {
        submission_id: Uuid,
        succeeded: bool,
        timestamp: DateTime<Utc>,
    },

    /// Zoom modal opened or closed
    ModalChanged {
        open: bool,
        timestamp: DateTime<Utc>,
    },
}

impl WorkflowEvent {
    /// Event name used as the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            WorkflowEvent::PhraseLoaded { .. } => "PhraseLoaded",
            WorkflowEvent::FileSelected { .. } => "FileSelected",
            WorkflowEvent::SubmissionStarted { .. } => "SubmissionStarted",
            WorkflowEvent::SubmissionSettled { .. } => "SubmissionSettled",
            WorkflowEvent::ModalChanged { .. } => "ModalChanged",
        }
    }
}

/// Broadcast bus for [`WorkflowEvent`]s
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<WorkflowEvent>,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// Old events are dropped for lagging receivers once `capacity` is exceeded.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: WorkflowEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
