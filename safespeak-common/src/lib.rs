//! # SafeSpeak Common Library
//!
//! Shared code for the SafeSpeak verification workflow including:
//! - Wire types of the remote phrase and verification services
//! - Workflow event types (WorkflowEvent enum) and the event bus
//! - Configuration loading
//! - Common error type

pub mod api;
pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
