//! Live search over WebSocket.
//!
//! Each connection owns one [`ListController`]. The client sends commands
//! that change the query or page; every state transition of the controller
//! (loading, results, error) is pushed back as a `state` message. The
//! controller's request sequence guarantees that a slow response for an old
//! query never reaches the client after a newer one.
//!
//! ```text
//! -> {"type": "set_query", "query": "alien"}
//! -> {"type": "set_page", "page": 2}
//! <- {"type": "state", "data": {"movies": [...], "loading": false, "error": null, "page": 2, "query": "alien"}}
//! <- {"type": "error", "data": {"message": "..."}}
//! ```

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use jafflix_core::list::{ListController, ListQuery, ListState};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::RequireSession;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Inbound command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    SetQuery { query: String },
    SetPage { page: i64 },
}

impl ClientCommand {
    pub fn apply(self, controller: &ListController) {
        match self {
            ClientCommand::SetQuery { query } => controller.set_query(query.trim()),
            ClientCommand::SetPage { page } => controller.set_page(page),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Outbound message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    State(ListState),
    Error(ErrorPayload),
}

impl ServerMessage {
    pub fn to_message(&self) -> Option<Message> {
        match serde_json::to_string(self) {
            Ok(json) => Some(Message::Text(json.into())),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize live-search message");
                None
            }
        }
    }
}

/// Apply one text frame to `controller`. Returns the error to send back if
/// the frame is not a valid command.
pub fn handle_text(text: &str, controller: &ListController) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => {
            command.apply(controller);
            None
        }
        Err(e) => Some(ServerMessage::Error(ErrorPayload {
            message: format!("Invalid command: {e}"),
        })),
    }
}

/// GET /api/v1/ws/search -- upgrade to a live-search connection.
///
/// Requires a signed-in visitor; the upgrade is refused with 401 otherwise.
pub async fn search_ws_handler(
    ws: WebSocketUpgrade,
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let user_id = session.user_id().map(String::from);
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

/// Manage a single live-search connection after upgrade.
///
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards channel messages to the sink.
///   3. Spawns a push task that forwards controller state changes.
///   4. Applies inbound commands on the current task.
///   5. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: Option<String>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = ?user_id, "Live search connected");

    let ws_manager = Arc::clone(&state.ws_manager);
    let mut rx = ws_manager.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    let controller = ListController::new(state.catalog.clone(), ListQuery::default());
    let push_task = spawn_state_push(
        controller.subscribe(),
        Arc::clone(&ws_manager),
        conn_id.clone(),
    );

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                if let Some(reply) = handle_text(text.as_str(), &controller) {
                    if let Some(msg) = reply.to_message() {
                        ws_manager.send_to(&conn_id, msg).await;
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    push_task.abort();
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Live search disconnected");
}

/// Forward the current state and every later transition to the connection.
fn spawn_state_push(
    mut updates: tokio::sync::watch::Receiver<ListState>,
    ws_manager: Arc<WsManager>,
    conn_id: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let snapshot = updates.borrow_and_update().clone();
            if let Some(msg) = ServerMessage::State(snapshot).to_message() {
                if !ws_manager.send_to(&conn_id, msg).await {
                    break;
                }
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
    })
}
