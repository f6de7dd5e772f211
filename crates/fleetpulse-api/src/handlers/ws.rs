//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use crate::state::AppState;

/// GET /ws — WebSocket upgrade
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Handles an established WebSocket connection.
///
/// The dashboard only listens; inbound frames other than close are
/// ignored. A dedicated writer task drains this client's broadcast
/// buffer so one slow socket never blocks a publish.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.hub.subscribe();
    let client_id = handle.id;

    info!(client_id = %client_id, "WebSocket connection established");

    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(client_id = %client_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.hub.unsubscribe(&client_id);

    info!(client_id = %client_id, "WebSocket connection closed");
}
