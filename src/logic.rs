//! Core behaviors shared by both HTTP and WebSocket handlers.

use tracing::{debug, info, instrument, warn};

use crate::protocol::{lesson_to_out, quiz_to_out, session_to_out, LessonOut, QuizOut, SessionOut};
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub fn list_sessions(state: &AppState) -> Vec<SessionOut> {
  state.sessions().iter().map(session_to_out).collect()
}

/// Render a lesson by id; None if the id is unknown.
#[instrument(level = "info", skip(state), fields(%lesson_id))]
pub fn lesson_html(state: &AppState, lesson_id: &str) -> Option<LessonOut> {
  match state.render_lesson(lesson_id) {
    Some((lesson, html)) => {
      info!(target: "lessons", id = %lesson.id, session = %lesson.session_id, html_len = html.len(), "Lesson rendered");
      Some(lesson_to_out(lesson, html))
    }
    None => {
      warn!(target: "lessons", %lesson_id, "Unknown lesson id");
      None
    }
  }
}

/// Quizzes of a session in `order`, without answers; None if the session is unknown.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub fn session_quizzes(state: &AppState, session_id: &str) -> Option<Vec<QuizOut>> {
  let Some(quizzes) = state.quizzes_for_session(session_id) else {
    warn!(target: "lessons", %session_id, "Unknown session id");
    return None;
  };
  info!(target: "lessons", session = %session_id, count = quizzes.len(), "Session quizzes listed");
  Some(quizzes.iter().map(quiz_to_out).collect())
}

#[instrument(level = "info", skip(state, markdown), fields(markdown_len = markdown.len()))]
pub fn render_preview(state: &AppState, markdown: &str) -> String {
  debug!(target: "render", preview = %trunc_for_log(markdown, 80), "Preview requested");
  state.render_markdown(markdown)
}
