//! File intake and validation
//!
//! Browse and drop selections both land here. Only `audio/wav` uploads are
//! accepted; anything else, including no file at all, is a validation error.

use axum::body::Bytes;
use thiserror::Error;

/// The only accepted declared media type
pub const ACCEPTED_MEDIA_TYPE: &str = "audio/wav";

/// Shown when the selection is not a WAV file (or nothing was selected)
pub const INVALID_TYPE_MESSAGE: &str = "Only .wav files are allowed";

/// Shown when an upload exceeds the intake size limit
pub const TOO_LARGE_MESSAGE: &str = "File is too large. Please choose a smaller .wav file.";

/// Shown when submit is pressed with no valid file held
pub const MISSING_FILE_MESSAGE: &str = "Please upload a .wav file before submitting.";

/// Raw browse/drop selection as reported by the browser
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub name: String,
    pub media_type: Option<String>,
    pub content: Bytes,
}

impl FileSelection {
    pub fn new(name: impl Into<String>, media_type: Option<&str>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.map(str::to_string),
            content: content.into(),
        }
    }
}

/// A selection that passed validation
///
/// Only [`validate_selection`] constructs these, so holding one means the
/// declared media type was `audio/wav`.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    name: String,
    media_type: String,
    content: Bytes,
}

impl CandidateFile {
    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// File bytes (reference-counted, cheap to clone)
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

/// User-facing validation message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Selection was not a WAV file, or no file was selected
    pub fn invalid_type() -> Self {
        Self {
            message: INVALID_TYPE_MESSAGE.to_string(),
        }
    }

    /// Upload body exceeded the intake limit
    pub fn too_large() -> Self {
        Self {
            message: TOO_LARGE_MESSAGE.to_string(),
        }
    }

    /// Submit was attempted without a valid file
    pub fn missing_file() -> Self {
        Self {
            message: MISSING_FILE_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validate a browse/drop selection
///
/// The media type comparison ignores ASCII case and any `;` parameters, so
/// `Audio/WAV; codecs=1` is accepted while `audio/x-wav` and `audio/mpeg` are not.
pub fn validate_selection(selection: Option<FileSelection>) -> Result<CandidateFile, ValidationError> {
    let selection = selection.ok_or_else(ValidationError::invalid_type)?;

    let essence = selection
        .media_type
        .as_deref()
        .and_then(|t| t.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if !essence.eq_ignore_ascii_case(ACCEPTED_MEDIA_TYPE) {
        return Err(ValidationError::invalid_type());
    }

    Ok(CandidateFile {
        name: selection.name,
        media_type: ACCEPTED_MEDIA_TYPE.to_string(),
        content: selection.content,
    })
}
