//! Result presentation
//!
//! Turns a [`Workflow`] into a [`PageView`]: plain data describing what the
//! page shows. [`page`] renders that view to HTML. Nothing here mutates state;
//! the modal transitions live on the workflow itself.

pub mod page;

use safespeak_common::api::{PlotKind, Verdict, VerificationResult};
use serde_json::Value;

use crate::workflow::{SubmissionState, Workflow};

/// Drop-zone label when no file is held
pub const NO_FILE_LABEL: &str = "Choose a WAV file";

/// Visual treatment keyed by verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictTone {
    Trust,
    Caution,
}

impl VerdictTone {
    /// CSS class suffix
    pub fn css_class(&self) -> &'static str {
        match self {
            VerdictTone::Trust => "trust",
            VerdictTone::Caution => "caution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictView {
    pub label: &'static str,
    pub tone: VerdictTone,
    pub explanation: &'static str,
    pub badge: &'static str,
}

impl VerdictView {
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Real => Self {
                label: "REAL",
                tone: VerdictTone::Trust,
                explanation: "This audio appears to be authentic",
                badge: "✓ Safe to trust",
            },
            Verdict::Fake => Self {
                label: "FAKE",
                tone: VerdictTone::Caution,
                explanation: "This audio appears to be synthetically generated",
                badge: "⚠️ Exercise caution",
            },
        }
    }
}

/// One diagnostic plot card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotCard {
    pub kind: PlotKind,
    pub title: &'static str,
    pub description: &'static str,
    pub alt: &'static str,
    pub image: String,
}

fn plot_labels(kind: PlotKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        PlotKind::Distribution => (
            "Feature Distribution",
            "Distribution of audio characteristics",
            "Feature Distribution Plot",
        ),
        PlotKind::Importance => (
            "Feature Importance",
            "Key factors in the analysis",
            "Feature Importance Plot",
        ),
        PlotKind::Statistics => (
            "Feature Statistics",
            "Statistical measurements",
            "Feature Statistics Plot",
        ),
    }
}

/// Cards for the plots present in `result`, in fixed order
pub fn plot_cards(result: &VerificationResult) -> Vec<PlotCard> {
    result
        .present_plots()
        .into_iter()
        .map(|(kind, image)| {
            let (title, description, alt) = plot_labels(kind);
            PlotCard {
                kind,
                title,
                description,
                alt,
                image: image.to_string(),
            }
        })
        .collect()
}

/// Extra result fields as `(key, display value)` pairs
pub fn extra_fields(result: &VerificationResult) -> Vec<(String, String)> {
    result
        .extra
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(s) => s.clone(),
                Value::Null => "null".to_string(),
                other => other.to_string(),
            };
            (key.clone(), shown)
        })
        .collect()
}

/// What the results region shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// Idle or Submitting: neither verdict nor error
    Empty,
    Verdict {
        verdict: VerdictView,
        plots: Vec<PlotCard>,
        extra: Vec<(String, String)>,
    },
    Error(String),
}

impl ResultView {
    pub fn from_state(state: &SubmissionState) -> Self {
        match state {
            SubmissionState::Idle | SubmissionState::Submitting { .. } => ResultView::Empty,
            SubmissionState::Succeeded { result } => ResultView::Verdict {
                verdict: VerdictView::for_verdict(result.verdict),
                plots: plot_cards(result),
                extra: extra_fields(result),
            },
            SubmissionState::Failed { message } => ResultView::Error(message.clone()),
        }
    }
}

/// Everything the workflow page shows
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub phrase: Option<String>,
    pub file_label: String,
    pub validation_error: Option<String>,
    /// Loading indicator visible (exactly while Submitting)
    pub loading: bool,
    pub can_submit: bool,
    pub result: ResultView,
    /// Image shown full-size when the modal is open
    pub modal_image: Option<String>,
}

impl PageView {
    pub fn from_workflow(workflow: &Workflow) -> Self {
        Self {
            phrase: workflow.phrase().map(str::to_string),
            file_label: workflow
                .candidate()
                .map(|f| f.name().to_string())
                .unwrap_or_else(|| NO_FILE_LABEL.to_string()),
            validation_error: workflow.validation_error().map(|e| e.message().to_string()),
            loading: workflow.submission().is_submitting(),
            can_submit: workflow.can_submit(),
            result: ResultView::from_state(workflow.submission()),
            modal_image: workflow.modal().image().map(str::to_string),
        }
    }
}
