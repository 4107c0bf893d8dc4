//! Test helpers for safespeak-ui integration tests
//!
//! - StubService: in-process stand-in for the phrase and verification endpoints
//! - Fixtures for audio file selections

#![allow(dead_code)]

pub mod stub_service;

pub use stub_service::{PhraseReply, ReceivedUpload, StubService, VerifyReply};

use axum::body::Bytes;
use safespeak_ui::workflow::FileSelection;

/// Minimal WAV-looking payload; the host never decodes it
pub const WAV_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

pub fn wav_selection(name: &str) -> Option<FileSelection> {
    Some(FileSelection::new(name, Some("audio/wav"), Bytes::from_static(WAV_BYTES)))
}

pub fn mp3_selection(name: &str) -> Option<FileSelection> {
    Some(FileSelection::new(name, Some("audio/mpeg"), Bytes::from_static(b"ID3")))
}
