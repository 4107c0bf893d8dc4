//! Server-Sent Events for workflow changes
//!
//! The page listens here while it waits on the phrase or a submission.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::AppState;

/// GET /events - SSE stream of workflow events
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.session.event_bus().subscribe();
    info!(
        subscribers = state.session.event_bus().subscriber_count(),
        "New SSE client connected to workflow events"
    );

    let stream = async_stream::stream! {
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            match rx.recv().await {
                Ok(event) => {
                    let event_type = event.event_type();
                    match serde_json::to_string(&event) {
                        Ok(event_json) => {
                            debug!("SSE: Broadcasting workflow event: {}", event_type);
                            yield Ok(Event::default().event(event_type).data(event_json));
                        }
                        Err(e) => {
                            warn!("SSE: Failed to serialize event {}: {}", event_type, e);
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("SSE: client lagged, {} events skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
