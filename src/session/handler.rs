//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs one dashboard session per
//! connection.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::live::LiveSession;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::{ApiError, AppState};
use crate::scheduler::Scheduler;

/// WebSocket upgrade handler
///
/// Rejects the upgrade with 503 when the session limit is already reached.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    if state.sessions.is_full().await {
        return Err(ApiError::ServiceUnavailable(format!(
            "session limit of {} reached",
            state.sessions.max_sessions()
        )));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state)))
}

/// Run a dashboard session over an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    run_session(sender, receiver, state).await;
}

/// Session loop over any frame sink and frame stream
///
/// The session, its history and its scheduler live on this task only; they
/// are dropped when the loop exits, which stops the ticks. The registry slot
/// is held by a [`SessionGuard`](super::SessionGuard) and freed even if the
/// task panics.
async fn run_session<S, R, E>(mut sender: S, mut receiver: R, state: Arc<AppState>)
where
    S: Sink<Message> + Unpin + Send + 'static,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: std::fmt::Display,
{
    let guard = match state.sessions.acquire().await {
        Ok(guard) => guard,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register dashboard session");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Ok(text) = serde_json::to_string(&error_msg) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };
    let session_id = guard.id().clone();

    // Create channel for sending messages to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let conn_id_for_send = session_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            session_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let dashboard = &state.config.dashboard;
    let _ = tx.send(ServerMessage::Connected {
        session_id: session_id.clone(),
        update_interval_secs: dashboard.update_interval_secs,
        history_size: dashboard.history_size,
    });

    let mut session = LiveSession::from_config(session_id.clone(), &state.config, tx.clone());
    session.start();

    let mut scheduler = Scheduler::new(dashboard.update_interval());

    loop {
        tokio::select! {
            tick = scheduler.next_tick() => {
                match session.tick() {
                    Ok(report) => {
                        tracing::trace!(
                            session_id = %session_id,
                            tick,
                            delivered = report.delivered,
                            failed = report.failed,
                            "Tick propagated"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            session_id = %session_id,
                            tick,
                            error = %e,
                            "Tick skipped"
                        );
                    }
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(msg)) => {
                        if !handle_ws_message(&mut session, &tx, msg) {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::debug!(
                            session_id = %session_id,
                            error = %e,
                            "WebSocket receive error"
                        );
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut send_task => {
                break;
            }
        }
    }

    // Cleanup: stop the session before releasing its slot
    drop(scheduler);
    drop(session);
    drop(tx);
    send_task.abort();
    guard.release().await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
fn handle_ws_message(
    session: &mut LiveSession,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ping) => {
                    let _ = tx.send(ServerMessage::Pong);
                }
                Ok(ClientMessage::Refresh) => {
                    let report = session.refresh();
                    tracing::debug!(
                        session_id = %session.id(),
                        delivered = report.delivered,
                        "Refresh requested"
                    );
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session.id(),
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Send error but keep connection open
                    let _ = tx.send(ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    });
                }
            }
            true
        }
        Message::Binary(_) => {
            let _ = tx.send(ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            });
            true
        }
        Message::Ping(_) | Message::Pong(_) => {
            // Axum answers pings itself
            true
        }
        Message::Close(_) => {
            tracing::debug!(session_id = %session.id(), "Client requested close");
            false
        }
    }
}
