//! Domain models: curriculum sessions and their lessons.

use serde::{Deserialize, Serialize};

/// Minutes of class time per session unless configured otherwise.
pub const DEFAULT_SESSION_MINUTES: u32 = 100;

/// What a lesson page is for. Only affects how clients badge it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
  /// Theory / reading material.
  Lesson,
  /// Hands-on exercise with the code runner.
  Practice,
  /// Quiz intro page.
  Quiz,
}
impl Default for LessonKind {
  fn default() -> Self { LessonKind::Lesson }
}

/// One lesson page. `content` is lesson markdown, rendered on demand.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
  pub id: String,
  pub session_id: String,
  pub order: u32,
  pub title: String,
  pub kind: LessonKind,
  pub content: String,
}

/// Multiple-choice question attached to a session.
/// `answer` indexes into `options` and never leaves the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quiz {
  pub id: String,
  pub session_id: String,
  pub order: u32,
  pub question: String,
  pub options: Vec<String>,
  pub answer: usize,
}

/// A class session holding lessons and quizzes, each sorted by `order`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
  pub id: String,
  pub number: u32,
  pub title: String,
  pub description: String,
  pub duration_minutes: u32,
  pub lessons: Vec<Lesson>,
  pub quizzes: Vec<Quiz>,
}
