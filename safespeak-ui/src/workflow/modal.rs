//! Zoom modal state
//!
//! Independent of the submission lifecycle: opened from a rendered plot,
//! closed only by explicit dismissal.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModalViewState {
    #[default]
    Closed,
    Open { image: String },
}

impl ModalViewState {
    pub fn open(&mut self, image: impl Into<String>) {
        *self = ModalViewState::Open { image: image.into() };
    }

    pub fn close(&mut self) {
        *self = ModalViewState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalViewState::Open { .. })
    }

    /// Image shown while open
    pub fn image(&self) -> Option<&str> {
        match self {
            ModalViewState::Open { image } => Some(image),
            ModalViewState::Closed => None,
        }
    }
}
