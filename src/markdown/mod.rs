//! Lesson markdown → HTML fragment renderer.
//!
//! Lessons are authored in a small markdown dialect and rendered by a fixed
//! sequence of text stages (see `stages::PIPELINE`):
//!   fenced code → inline code → headings → bold → italic → blockquotes →
//!   tables → lists → paragraphs → cleanup.
//!
//! Rendering is total: any input produces some HTML, malformed constructs just
//! stay partially transformed. Fenced code is escaped and fully shielded from
//! later stages. Everything else passes raw HTML through unless the
//! `HtmlPolicy::Escape` policy is selected.

mod blocks;
mod escape;
mod stages;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Placeholder delimiters for stashed code blocks (Unicode private use area).
pub(crate) const CODE_OPEN: char = '\u{E000}';
pub(crate) const CODE_CLOSE: char = '\u{E001}';

/// What to do with raw HTML written outside fenced code blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtmlPolicy {
  /// Pass it through untouched. Only safe for author-curated content.
  Trusted,
  /// Escape it so it displays as text.
  Escape,
}
impl Default for HtmlPolicy {
  fn default() -> Self { HtmlPolicy::Trusted }
}

/// Per-call scratch state shared by the stages.
pub(crate) struct RenderContext {
  pub policy: HtmlPolicy,
  pub code_blocks: Vec<String>,
}

impl RenderContext {
  pub fn new(policy: HtmlPolicy) -> Self {
    Self { policy, code_blocks: Vec::new() }
  }

  /// Keep a finished code block aside and return its single-line placeholder.
  pub fn stash_code_block(&mut self, html: String) -> String {
    let idx = self.code_blocks.len();
    self.code_blocks.push(html);
    format!("{CODE_OPEN}{idx}{CODE_CLOSE}")
  }
}

/// Render lesson markdown with raw HTML passed through.
pub fn render(markdown: &str) -> String {
  render_with(markdown, HtmlPolicy::Trusted)
}

/// Render lesson markdown under an explicit HTML policy.
pub fn render_with(markdown: &str, policy: HtmlPolicy) -> String {
  let mut ctx = RenderContext::new(policy);
  let mut html = normalize_input(markdown);
  for stage in stages::PIPELINE {
    html = (stage.run)(&html, &mut ctx);
    trace!(target: "render", stage = stage.name, len = html.len(), "stage done");
  }
  debug!(
    target: "render",
    ?policy,
    input_len = markdown.len(),
    output_len = html.len(),
    code_blocks = ctx.code_blocks.len(),
    "Rendered lesson markdown"
  );
  html
}

/// LF line endings only, and no stray placeholder delimiters from the author.
fn normalize_input(markdown: &str) -> String {
  markdown
    .replace("\r\n", "\n")
    .replace('\r', "\n")
    .replace([CODE_OPEN, CODE_CLOSE], "")
}
