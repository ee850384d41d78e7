//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs request parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_sessions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let sessions = list_sessions(&state);
  info!(target: "lessons", count = sessions.len(), "HTTP sessions served");
  Json(sessions)
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_lesson(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<LessonOut>, (StatusCode, Json<ErrorOut>)> {
  lesson_html(&state, &id).map(Json).ok_or_else(|| {
    (StatusCode::NOT_FOUND, Json(ErrorOut { error: format!("Unknown lessonId: {}", id) }))
  })
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_session_quizzes(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<QuizOut>>, (StatusCode, Json<ErrorOut>)> {
  session_quizzes(&state, &id).map(Json).ok_or_else(|| {
    (StatusCode::NOT_FOUND, Json(ErrorOut { error: format!("Unknown sessionId: {}", id) }))
  })
}

#[instrument(level = "info", skip(state, body), fields(markdown_len = body.markdown.len()))]
pub async fn http_post_render(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RenderIn>,
) -> impl IntoResponse {
  let html = render_preview(&state, &body.markdown);
  Json(RenderOut { html })
}
