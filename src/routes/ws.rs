//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "pylesson_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "pylesson_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state);
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "pylesson_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "pylesson_backend", "WebSocket disconnected");
}

/// Parse, dispatch, serialize. Invalid JSON becomes an `error` reply.
fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "pylesson_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state)
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Render { markdown } => {
      let html = render_preview(state, &markdown);
      ServerWsMessage::Rendered { html }
    }

    ClientWsMessage::Lesson { lesson_id } => match lesson_html(state, &lesson_id) {
      Some(lesson) => {
        info!(target: "lessons", id = %lesson_id, "WS lesson served");
        ServerWsMessage::Lesson { lesson }
      }
      None => ServerWsMessage::Error { message: format!("Unknown lessonId: {}", lesson_id) },
    },

    ClientWsMessage::Quizzes { session_id } => match session_quizzes(state, &session_id) {
      Some(quizzes) => ServerWsMessage::Quizzes { session_id, quizzes },
      None => ServerWsMessage::Error { message: format!("Unknown sessionId: {}", session_id) },
    },
  }
}
