//! Wire types shared between the workflow and the remote services

pub mod types;

pub use types::{HealthResponse, PhraseResponse, PlotKind, Verdict, VerificationResult};
