//! Loading the curriculum configuration (render policy + sessions/lessons) from TOML.
//!
//! See `CurriculumConfig` for the expected schema.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::LessonKind;
use crate::markdown::HtmlPolicy;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CurriculumConfig {
  #[serde(default)]
  pub render: RenderCfg,
  #[serde(default)]
  pub sessions: Vec<SessionCfg>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct RenderCfg {
  #[serde(default)]
  pub html_policy: HtmlPolicy,
}

/// Session entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionCfg {
  #[serde(default)] pub id: Option<String>,
  pub number: u32,
  pub title: String,
  #[serde(default)] pub description: String,
  #[serde(default)] pub duration_minutes: Option<u32>,
  #[serde(default)] pub lessons: Vec<LessonCfg>,
  #[serde(default)] pub quizzes: Vec<QuizCfg>,
}

/// Lesson entry nested under a session (`[[sessions.lessons]]`).
#[derive(Clone, Debug, Deserialize)]
pub struct LessonCfg {
  #[serde(default)] pub id: Option<String>,
  pub order: u32,
  pub title: String,
  #[serde(default)] pub kind: LessonKind,
  #[serde(default)] pub content: String,
}

/// Quiz entry nested under a session (`[[sessions.quizzes]]`).
/// `answer` is the zero-based index of the correct option.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizCfg {
  #[serde(default)] pub id: Option<String>,
  pub order: u32,
  pub question: String,
  pub options: Vec<String>,
  pub answer: usize,
}

pub fn parse_curriculum_config(s: &str) -> Result<CurriculumConfig, toml::de::Error> {
  toml::from_str::<CurriculumConfig>(s)
}

/// Read and parse a config file. IO and parse errors are logged and yield None.
pub fn load_curriculum_config(path: &Path) -> Option<CurriculumConfig> {
  let shown = path.display();
  match std::fs::read_to_string(path) {
    Ok(s) => match parse_curriculum_config(&s) {
      Ok(cfg) => {
        info!(target: "pylesson_backend", path = %shown, sessions = cfg.sessions.len(), "Loaded curriculum config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "pylesson_backend", path = %shown, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "pylesson_backend", path = %shown, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Attempt to load `CurriculumConfig` from CURRICULUM_CONFIG_PATH.
pub fn load_curriculum_config_from_env() -> Option<CurriculumConfig> {
  let path = std::env::var("CURRICULUM_CONFIG_PATH").ok()?;
  load_curriculum_config(Path::new(&path))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_schema() {
    let cfg = parse_curriculum_config(
      r#"
[render]
html_policy = "escape"

[[sessions]]
id = "s-loops"
number = 3
title = "Loops"
description = "for and while"
duration_minutes = 90

[[sessions.lessons]]
id = "l-for"
order = 1
title = "for loops"
kind = "practice"
content = """
# for
- item
"""

[[sessions.quizzes]]
id = "q-range"
order = 1
question = "What does range(3) produce?"
options = ["1, 2, 3", "0, 1, 2", "0, 1, 2, 3"]
answer = 1
"#,
    )
    .expect("valid config");
    assert_eq!(cfg.render.html_policy, HtmlPolicy::Escape);
    assert_eq!(cfg.sessions.len(), 1);
    let s = &cfg.sessions[0];
    assert_eq!(s.id.as_deref(), Some("s-loops"));
    assert_eq!(s.duration_minutes, Some(90));
    assert_eq!(s.lessons[0].kind, LessonKind::Practice);
    assert_eq!(s.lessons[0].content, "# for\n- item\n");
    assert_eq!(s.quizzes.len(), 1);
    assert_eq!(s.quizzes[0].options[1], "0, 1, 2");
    assert_eq!(s.quizzes[0].answer, 1);
  }

  #[test]
  fn optional_fields_default() {
    let cfg = parse_curriculum_config(
      r#"
[[sessions]]
number = 1
title = "Intro"

[[sessions.lessons]]
order = 2
title = "Hello"
"#,
    )
    .expect("valid config");
    assert_eq!(cfg.render.html_policy, HtmlPolicy::Trusted);
    let s = &cfg.sessions[0];
    assert!(s.id.is_none() && s.duration_minutes.is_none() && s.description.is_empty());
    assert_eq!(s.lessons[0].kind, LessonKind::Lesson);
    assert!(s.lessons[0].content.is_empty());
    assert!(s.quizzes.is_empty());
  }

  #[test]
  fn quiz_without_answer_is_rejected() {
    let toml = "[[sessions]]\nnumber = 1\ntitle = \"T\"\n\n[[sessions.quizzes]]\norder = 1\nquestion = \"Q\"\noptions = [\"a\", \"b\"]\n";
    assert!(parse_curriculum_config(toml).is_err());
  }

  #[test]
  fn empty_file_is_a_valid_config() {
    let cfg = parse_curriculum_config("").expect("empty config");
    assert!(cfg.sessions.is_empty());
  }

  #[test]
  fn unknown_policy_is_rejected() {
    assert!(parse_curriculum_config("[render]\nhtml_policy = \"sanitize\"\n").is_err());
  }

  #[test]
  fn missing_file_yields_none() {
    assert!(load_curriculum_config(Path::new("/nonexistent/curriculum.toml")).is_none());
  }
}
