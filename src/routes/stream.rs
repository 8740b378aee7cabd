use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::SharedState;

/// GET /api/stream: SSE stream with one `snapshot` event per refresh.
///
/// The stream ends on shutdown so graceful shutdown is not held open by
/// connected dashboards.
pub async fn snapshot_stream(
    State(state): State<SharedState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.snapshot_tx.subscribe();
    let mut shutdown_rx = state.shutdown_tx.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(summary) => {
            let data = serde_json::to_string(&summary).unwrap_or_default();
            Some(Ok(Event::default().event("snapshot").data(data)))
        }
        Err(_) => None, // Skip lagged messages
    });

    let shutdown = async move {
        let _ = shutdown_rx.recv().await;
    };

    Sse::new(futures::StreamExt::take_until(event_stream, shutdown))
        .keep_alive(KeepAlive::default())
}
