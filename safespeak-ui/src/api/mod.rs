//! HTTP API handlers for safespeak-ui

pub mod health;
pub mod sse;
pub mod ui;
pub mod workflow;

pub use health::health_routes;
pub use sse::event_stream;
pub use ui::{serve_page, serve_workflow_js};
pub use workflow::workflow_routes;
