//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Lesson, LessonKind, Quiz, Session};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  /// Live preview while an admin edits lesson content.
  Render {
    markdown: String,
  },
  Lesson {
    #[serde(rename = "lessonId")]
    lesson_id: String,
  },
  Quizzes {
    #[serde(rename = "sessionId")]
    session_id: String,
  },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  Rendered {
    html: String,
  },
  Lesson {
    lesson: LessonOut,
  },
  Quizzes {
    #[serde(rename = "sessionId")]
    session_id: String,
    quizzes: Vec<QuizOut>,
  },
  Error {
    message: String,
  },
}

/// Rendered lesson, used by both WS and HTTP.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonOut {
  pub id: String,
  pub session_id: String,
  pub order: u32,
  pub title: String,
  pub kind: LessonKind,
  pub html: String,
}

/// Quiz as shown to students. The answer index stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOut {
  pub id: String,
  pub session_id: String,
  pub order: u32,
  pub question: String,
  pub options: Vec<String>,
}

/// Lesson entry in the curriculum listing (no content).
#[derive(Debug, Serialize)]
pub struct LessonSummaryOut {
  pub id: String,
  pub order: u32,
  pub title: String,
  pub kind: LessonKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
  pub id: String,
  pub number: u32,
  pub title: String,
  pub description: String,
  pub duration_minutes: u32,
  pub lessons: Vec<LessonSummaryOut>,
  pub quiz_count: usize,
}

pub fn lesson_to_out(l: &Lesson, html: String) -> LessonOut {
  LessonOut {
    id: l.id.clone(),
    session_id: l.session_id.clone(),
    order: l.order,
    title: l.title.clone(),
    kind: l.kind,
    html,
  }
}

pub fn quiz_to_out(q: &Quiz) -> QuizOut {
  QuizOut {
    id: q.id.clone(),
    session_id: q.session_id.clone(),
    order: q.order,
    question: q.question.clone(),
    options: q.options.clone(),
  }
}

pub fn session_to_out(s: &Session) -> SessionOut {
  SessionOut {
    id: s.id.clone(),
    number: s.number,
    title: s.title.clone(),
    description: s.description.clone(),
    duration_minutes: s.duration_minutes,
    lessons: s
      .lessons
      .iter()
      .map(|l| LessonSummaryOut { id: l.id.clone(), order: l.order, title: l.title.clone(), kind: l.kind })
      .collect(),
    quiz_count: s.quizzes.len(),
  }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct RenderIn {
  pub markdown: String,
}
#[derive(Serialize)]
pub struct RenderOut {
  pub html: String,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
  pub error: String,
}
