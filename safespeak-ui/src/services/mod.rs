//! Clients for the remote phrase and verification services

pub mod phrase_client;
pub mod verification_client;

pub use phrase_client::{PhraseClient, PhraseError};
pub use verification_client::{VerificationClient, VerifyError};

/// User-Agent sent to both remote services
pub const USER_AGENT: &str = concat!("SafeSpeak/", env!("CARGO_PKG_VERSION"));
