//! WebSocket handling.
//!
//! Each connection speaks the same tagged request/response contract as
//! POST /message, and additionally receives server-initiated notification
//! broadcasts. Responses from concurrent handlers multiplex over one
//! sender task, so a slow refresh never blocks a quick data read.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use courseflow_protocols::Response;

use crate::router::{dispatch, parse_request};
use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket connected");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Response>(100);

    // One sender task owns the sink; handlers and broadcasts feed it.
    let sender_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&message) {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Forward notification broadcasts to this connection.
    let mut notifications = state.subscribe();
    let notify_tx = tx.clone();
    let notify_task = tokio::spawn(async move {
        while let Ok(notification) = notifications.recv().await {
            if notify_tx.send(notification).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let response = match parse_request(&text) {
                    Ok(request) => {
                        // Handle each request on its own task so a long
                        // refresh does not serialize the connection.
                        let state = state.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let response = dispatch(&state, request).await;
                            let _ = tx.send(response).await;
                        });
                        continue;
                    }
                    Err(error_response) => error_response,
                };
                if tx.send(response).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                debug!("WebSocket close frame received");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    notify_task.abort();
    sender_task.abort();
    info!("WebSocket disconnected");
}
