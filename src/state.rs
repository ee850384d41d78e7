//! Application state: the indexed curriculum and the render policy.
//!
//! Built once at startup and never mutated afterwards, so handlers share it
//! through an `Arc` without locking.
//!
//! Sources, in priority order:
//!   - sessions from the TOML config (CURRICULUM_CONFIG_PATH)
//!   - built-in seeds, only when the config provides no sessions

use std::collections::{HashMap, HashSet};

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{load_curriculum_config_from_env, CurriculumConfig, QuizCfg, SessionCfg};
use crate::domain::{Lesson, Quiz, Session, DEFAULT_SESSION_MINUTES};
use crate::markdown::{render, render_with, HtmlPolicy};
use crate::seeds::seed_sessions;

pub struct AppState {
  sessions: Vec<Session>,
  /// session id -> session index
  session_index: HashMap<String, usize>,
  /// lesson id -> (session index, lesson index)
  lesson_index: HashMap<String, (usize, usize)>,
  pub html_policy: HtmlPolicy,
}

impl AppState {
  /// Build state from env: load config, fall back to seeds, build the index.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    Self::from_config(load_curriculum_config_from_env())
  }

  pub fn from_config(cfg_opt: Option<CurriculumConfig>) -> Self {
    let html_policy = cfg_opt
      .as_ref()
      .map(|c| c.render.html_policy)
      .unwrap_or_default();

    let mut sessions = match &cfg_opt {
      Some(cfg) if !cfg.sessions.is_empty() => sessions_from_config(&cfg.sessions),
      _ => {
        info!(target: "lessons", "No configured sessions; using built-in seed curriculum");
        seed_sessions()
      }
    };

    sessions.sort_by_key(|s| s.number);
    for s in &mut sessions {
      s.lessons.sort_by_key(|l| l.order);
      s.quizzes.sort_by_key(|q| q.order);
    }

    let mut session_index = HashMap::new();
    let mut lesson_index = HashMap::new();
    for (si, s) in sessions.iter().enumerate() {
      session_index.insert(s.id.clone(), si);
      for (li, l) in s.lessons.iter().enumerate() {
        lesson_index.insert(l.id.clone(), (si, li));
      }
    }

    for s in &sessions {
      info!(target: "lessons", session = %s.id, number = s.number, lessons = s.lessons.len(), quizzes = s.quizzes.len(), "Startup curriculum inventory");
    }
    if html_policy == HtmlPolicy::Trusted {
      info!(target: "pylesson_backend", "Raw HTML in lesson content is passed through (html_policy = trusted)");
    }

    Self { sessions, session_index, lesson_index, html_policy }
  }

  pub fn sessions(&self) -> &[Session] {
    &self.sessions
  }

  /// Read-only access to a lesson by id.
  #[instrument(level = "debug", skip(self), fields(%id))]
  pub fn get_lesson(&self, id: &str) -> Option<&Lesson> {
    let (si, li) = *self.lesson_index.get(id)?;
    self.sessions.get(si)?.lessons.get(li)
  }

  /// Quizzes of a session sorted by `order`; None if the session id is unknown.
  #[instrument(level = "debug", skip(self), fields(%session_id))]
  pub fn quizzes_for_session(&self, session_id: &str) -> Option<&[Quiz]> {
    let si = *self.session_index.get(session_id)?;
    self.sessions.get(si).map(|s| s.quizzes.as_slice())
  }

  /// Render arbitrary lesson markdown under the configured policy.
  pub fn render_markdown(&self, markdown: &str) -> String {
    match self.html_policy {
      HtmlPolicy::Trusted => render(markdown),
      policy => render_with(markdown, policy),
    }
  }

  /// Look up a lesson and render its content.
  pub fn render_lesson(&self, id: &str) -> Option<(&Lesson, String)> {
    let lesson = self.get_lesson(id)?;
    Some((lesson, self.render_markdown(&lesson.content)))
  }
}

/// Convert config entries, generating missing ids and skipping unusable lessons.
fn sessions_from_config(entries: &[SessionCfg]) -> Vec<Session> {
  let mut seen_sessions = HashSet::new();
  let mut seen_lessons = HashSet::new();
  let mut seen_quizzes = HashSet::new();
  let mut out = Vec::with_capacity(entries.len());

  for sc in entries {
    let id = sc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
    if !seen_sessions.insert(id.clone()) {
      warn!(target: "lessons", session = %id, "Skipping duplicate session id");
      continue;
    }

    let mut lessons = Vec::with_capacity(sc.lessons.len());
    for lc in &sc.lessons {
      let lesson_id = lc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
      if lc.title.trim().is_empty() {
        error!(target: "lessons", session = %id, lesson = %lesson_id, "Skipping lesson: missing title.");
        continue;
      }
      if !seen_lessons.insert(lesson_id.clone()) {
        warn!(target: "lessons", session = %id, lesson = %lesson_id, "Skipping duplicate lesson id");
        continue;
      }
      lessons.push(Lesson {
        id: lesson_id,
        session_id: id.clone(),
        order: lc.order,
        title: lc.title.clone(),
        kind: lc.kind,
        content: lc.content.clone(),
      });
    }

    let quizzes = sc
      .quizzes
      .iter()
      .filter_map(|qc| quiz_from_config(&id, qc, &mut seen_quizzes))
      .collect();

    out.push(Session {
      id,
      number: sc.number,
      title: sc.title.clone(),
      description: sc.description.clone(),
      duration_minutes: sc.duration_minutes.unwrap_or(DEFAULT_SESSION_MINUTES),
      lessons,
      quizzes,
    });
  }
  out
}

/// A quiz needs a question, two or more options, and an answer index in range.
fn quiz_from_config(session_id: &str, qc: &QuizCfg, seen: &mut HashSet<String>) -> Option<Quiz> {
  let id = qc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
  if qc.question.trim().is_empty() || qc.options.len() < 2 {
    error!(target: "lessons", session = %session_id, quiz = %id, "Skipping quiz: needs a question and at least two options.");
    return None;
  }
  if qc.answer >= qc.options.len() {
    error!(target: "lessons", session = %session_id, quiz = %id, answer = qc.answer, options = qc.options.len(), "Skipping quiz: answer index out of range.");
    return None;
  }
  if !seen.insert(id.clone()) {
    warn!(target: "lessons", session = %session_id, quiz = %id, "Skipping duplicate quiz id");
    return None;
  }
  Some(Quiz {
    id,
    session_id: session_id.to_string(),
    order: qc.order,
    question: qc.question.clone(),
    options: qc.options.clone(),
    answer: qc.answer,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::parse_curriculum_config;

  const CONFIG: &str = r##"
[render]
html_policy = "escape"

[[sessions]]
id = "b"
number = 2
title = "Second"

[[sessions.lessons]]
id = "b2"
order = 2
title = "Later"
content = "# Later <i>x</i>"

[[sessions.lessons]]
id = "b1"
order = 1
title = "Sooner"

[[sessions.lessons]]
id = "blank"
order = 3
title = "  "

[[sessions.quizzes]]
id = "q2"
order = 2
question = "Second?"
options = ["x", "y"]
answer = 0

[[sessions.quizzes]]
id = "q1"
order = 1
question = "First?"
options = ["x", "y", "z"]
answer = 2

[[sessions.quizzes]]
id = "q-range"
order = 3
question = "Broken?"
options = ["x", "y"]
answer = 2

[[sessions.quizzes]]
id = "q-single"
order = 4
question = "Lonely?"
options = ["x"]
answer = 0

[[sessions]]
id = "a"
number = 1
title = "First"

[[sessions.lessons]]
order = 1
title = "No id"

[[sessions.lessons]]
id = "b1"
order = 2
title = "Duplicate"
"##;

  fn state() -> AppState {
    AppState::from_config(Some(parse_curriculum_config(CONFIG).expect("config")))
  }

  #[test]
  fn without_config_seeds_are_served() {
    let st = AppState::from_config(None);
    assert_eq!(st.sessions().len(), seed_sessions().len());
    assert_eq!(st.html_policy, HtmlPolicy::Trusted);
    assert!(st.get_lesson("s1-l1").is_some());
  }

  #[test]
  fn config_sessions_replace_seeds_and_are_sorted() {
    let st = state();
    let numbers: Vec<_> = st.sessions().iter().map(|s| s.number).collect();
    assert_eq!(numbers, [1, 2]);
    let orders: Vec<_> = st.sessions()[1].lessons.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(orders, ["b1", "b2"]);
    assert!(st.get_lesson("s1-l1").is_none());
  }

  #[test]
  fn blank_titles_and_duplicate_ids_are_skipped() {
    let st = state();
    assert!(st.get_lesson("blank").is_none());
    let first = &st.sessions()[0];
    assert_eq!(first.lessons.len(), 1);
    assert_eq!(first.lessons[0].title, "No id");
    assert!(!first.lessons[0].id.is_empty());
    assert_eq!(st.get_lesson("b1").map(|l| l.title.as_str()), Some("Sooner"));
  }

  #[test]
  fn default_duration_applies() {
    assert_eq!(state().sessions()[0].duration_minutes, DEFAULT_SESSION_MINUTES);
  }

  #[test]
  fn render_lesson_uses_configured_policy() {
    let st = state();
    let (lesson, html) = st.render_lesson("b2").expect("lesson");
    assert_eq!(lesson.session_id, "b");
    assert_eq!(html, "<h1>Later &lt;i&gt;x&lt;/i&gt;</h1>");
    assert!(st.render_lesson("nope").is_none());
  }

  #[test]
  fn quizzes_are_sorted_and_invalid_ones_skipped() {
    let st = state();
    let ids: Vec<_> = st.quizzes_for_session("b").expect("session").iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["q1", "q2"]);
    assert_eq!(st.quizzes_for_session("a").map(<[Quiz]>::len), Some(0));
    assert!(st.quizzes_for_session("missing").is_none());
  }

  #[test]
  fn trusted_policy_renders_raw_html() {
    let st = AppState::from_config(None);
    assert_eq!(st.render_markdown("<b>hi</b>"), "<p><b>hi</b></p>");
  }
}
