//! The ordered transformation stages of the renderer.
//!
//! Order matters: later stages rely on the output shape of earlier ones.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::blocks::{group_list_items, group_tables};
use super::escape::{escape_html, escape_preserving_quotes};
use super::{HtmlPolicy, RenderContext, CODE_CLOSE, CODE_OPEN};

/// One named pass of the pipeline.
pub(crate) struct Stage {
  pub name: &'static str,
  pub run: fn(&str, &mut RenderContext) -> String,
}

pub(crate) const PIPELINE: &[Stage] = &[
  Stage { name: "fenced_code", run: fenced_code },
  Stage { name: "inline_code", run: inline_code },
  Stage { name: "headings", run: headings },
  Stage { name: "bold", run: bold },
  Stage { name: "italic", run: italic },
  Stage { name: "blockquotes", run: blockquotes },
  Stage { name: "tables", run: tables },
  Stage { name: "lists", run: lists },
  Stage { name: "paragraphs", run: paragraphs },
  Stage { name: "cleanup", run: cleanup },
  Stage { name: "restore_code", run: restore_code },
];

static FENCED_CODE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"```([A-Za-z0-9_]+)?\n((?s:.*?))```").expect("fenced code pattern"));
static INLINE_CODE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern"));
static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.+)$").expect("h3 pattern"));
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").expect("h2 pattern"));
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("h1 pattern"));
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern"));
static BLOCKQUOTE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^> (.+)$").expect("blockquote pattern"));
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank run pattern"));
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!("{CODE_OPEN}([0-9]+){CODE_CLOSE}")).expect("placeholder pattern")
});

/// Elements that sit inside a paragraph rather than replacing one.
const PHRASING_ELEMENTS: &[&str] = &[
  "a", "abbr", "b", "br", "cite", "code", "em", "i", "img", "kbd", "mark", "q", "s", "samp",
  "small", "span", "strong", "sub", "sup", "u", "var",
];

/// ```` ```lang\nbody``` ```` becomes an escaped `<pre><code>` block, stashed
/// behind a placeholder so no later stage can see its contents.
fn fenced_code(input: &str, ctx: &mut RenderContext) -> String {
  let mut out = String::with_capacity(input.len());
  let mut last = 0;
  for caps in FENCED_CODE_RE.captures_iter(input) {
    let Some(whole) = caps.get(0) else { continue };
    push_text(&mut out, input, last, whole.start(), ctx.policy);
    let lang = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());
    let block = format!(
      r#"<pre><code class="language-{lang}">{}</code></pre>"#,
      escape_html(body.trim())
    );
    out.push_str(&ctx.stash_code_block(block));
    last = whole.end();
  }
  push_text(&mut out, input, last, input.len(), ctx.policy);
  out
}

fn push_text(out: &mut String, input: &str, start: usize, end: usize, policy: HtmlPolicy) {
  let segment = &input[start..end];
  match policy {
    HtmlPolicy::Trusted => out.push_str(segment),
    HtmlPolicy::Escape => {
      let at_line_start = start == 0 || input[..start].ends_with('\n');
      out.push_str(&escape_preserving_quotes(segment, at_line_start));
    }
  }
}

fn inline_code(input: &str, _ctx: &mut RenderContext) -> String {
  INLINE_CODE_RE.replace_all(input, "<code>${1}</code>").into_owned()
}

/// Most specific level first, so `### x` is never read as `# ##x`.
fn headings(input: &str, _ctx: &mut RenderContext) -> String {
  let html = H3_RE.replace_all(input, "<h3>${1}</h3>");
  let html = H2_RE.replace_all(&html, "<h2>${1}</h2>");
  H1_RE.replace_all(&html, "<h1>${1}</h1>").into_owned()
}

fn bold(input: &str, _ctx: &mut RenderContext) -> String {
  BOLD_RE.replace_all(input, "<strong>${1}</strong>").into_owned()
}

fn italic(input: &str, _ctx: &mut RenderContext) -> String {
  ITALIC_RE.replace_all(input, "<em>${1}</em>").into_owned()
}

fn blockquotes(input: &str, _ctx: &mut RenderContext) -> String {
  BLOCKQUOTE_RE.replace_all(input, "<blockquote>${1}</blockquote>").into_owned()
}

fn tables(input: &str, _ctx: &mut RenderContext) -> String {
  group_tables(input)
}

fn lists(input: &str, _ctx: &mut RenderContext) -> String {
  group_list_items(input)
}

fn paragraphs(input: &str, _ctx: &mut RenderContext) -> String {
  input
    .split('\n')
    .map(|line| {
      if needs_paragraph(line) {
        format!("<p>{line}</p>")
      } else {
        line.to_string()
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn needs_paragraph(line: &str) -> bool {
  if line.trim().is_empty() || line.starts_with(CODE_OPEN) {
    return false;
  }
  !starts_with_block_tag(line)
}

/// `<` followed by a lowercase letter or `/`, naming anything but a phrasing element.
fn starts_with_block_tag(line: &str) -> bool {
  let Some(rest) = line.strip_prefix('<') else {
    return false;
  };
  let (closing, rest) = match rest.strip_prefix('/') {
    Some(r) => (true, r),
    None => (false, rest),
  };
  if !closing && !rest.starts_with(|c: char| c.is_ascii_lowercase()) {
    return false;
  }
  let end = rest.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(rest.len());
  !PHRASING_ELEMENTS.contains(&&rest[..end])
}

fn cleanup(input: &str, _ctx: &mut RenderContext) -> String {
  let html = input.replace("<p></p>", "");
  BLANK_RUN_RE.replace_all(&html, "\n").into_owned()
}

fn restore_code(input: &str, ctx: &mut RenderContext) -> String {
  PLACEHOLDER_RE
    .replace_all(input, |caps: &Captures<'_>| {
      caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|idx| ctx.code_blocks.get(idx))
        .cloned()
        .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run(stage: fn(&str, &mut RenderContext) -> String, input: &str) -> String {
    stage(input, &mut RenderContext::new(HtmlPolicy::Trusted))
  }

  #[test]
  fn pipeline_order_is_fixed() {
    let names: Vec<_> = PIPELINE.iter().map(|s| s.name).collect();
    assert_eq!(
      names,
      [
        "fenced_code", "inline_code", "headings", "bold", "italic", "blockquotes", "tables",
        "lists", "paragraphs", "cleanup", "restore_code",
      ]
    );
  }

  #[test]
  fn fenced_code_is_stashed_and_escaped() {
    let mut ctx = RenderContext::new(HtmlPolicy::Trusted);
    let out = fenced_code("a\n```py\n  if a < b:\n    pass\n```\nb", &mut ctx);
    assert_eq!(out, format!("a\n{CODE_OPEN}0{CODE_CLOSE}\nb"));
    assert_eq!(
      ctx.code_blocks,
      vec![r#"<pre><code class="language-py">if a &lt; b:
    pass</code></pre>"#.to_string()]
    );
  }

  #[test]
  fn unterminated_fence_is_left_for_later_stages() {
    let mut ctx = RenderContext::new(HtmlPolicy::Trusted);
    assert_eq!(fenced_code("```py\nprint(1)", &mut ctx), "```py\nprint(1)");
    assert!(ctx.code_blocks.is_empty());
  }

  #[test]
  fn heading_levels_need_a_space_and_text() {
    assert_eq!(run(headings, "### a\n## b\n# c"), "<h3>a</h3>\n<h2>b</h2>\n<h1>c</h1>");
    assert_eq!(run(headings, "#### d\n#e\n# "), "#### d\n#e\n# ");
  }

  #[test]
  fn bold_runs_before_italic() {
    let html = run(bold, "**a** *b* ***c***");
    assert_eq!(run(italic, &html), "<strong>a</strong> <em>b</em> <strong><em>c</strong></em>");
  }

  #[test]
  fn emphasis_does_not_cross_lines() {
    assert_eq!(run(italic, "*a\nb*"), "*a\nb*");
  }

  #[test]
  fn inline_code_content_is_not_escaped() {
    assert_eq!(run(inline_code, "`<b>`"), "<code><b></code>");
  }

  #[test]
  fn blockquote_requires_marker_space() {
    assert_eq!(run(blockquotes, "> hi\n>no"), "<blockquote>hi</blockquote>\n>no");
  }

  #[test]
  fn phrasing_tags_do_not_count_as_blocks() {
    assert!(starts_with_block_tag("<h1>x</h1>"));
    assert!(starts_with_block_tag("<blockquote>x</blockquote>"));
    assert!(starts_with_block_tag("</div>"));
    assert!(starts_with_block_tag("<script>"));
    assert!(!starts_with_block_tag("<strong>x</strong>"));
    assert!(!starts_with_block_tag("<code>x</code>"));
    assert!(!starts_with_block_tag("<B>"));
    assert!(!starts_with_block_tag("<!-- c -->"));
    assert!(!starts_with_block_tag("plain"));
  }

  #[test]
  fn paragraphs_skip_blank_and_placeholder_lines() {
    let input = format!("text\n   \n{CODE_OPEN}0{CODE_CLOSE}\n<ul><li>x</li></ul>");
    assert_eq!(
      run(paragraphs, &input),
      format!("<p>text</p>\n   \n{CODE_OPEN}0{CODE_CLOSE}\n<ul><li>x</li></ul>")
    );
  }

  #[test]
  fn cleanup_collapses_blank_runs() {
    assert_eq!(run(cleanup, "<p>a</p>\n\n\n<p></p><p>b</p>\n\n"), "<p>a</p>\n<p>b</p>\n");
  }

  #[test]
  fn unknown_placeholder_is_left_alone() {
    let input = format!("{CODE_OPEN}7{CODE_CLOSE}");
    assert_eq!(run(restore_code, &input), input);
  }
}
