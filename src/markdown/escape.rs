//! HTML escaping for text that must not be interpreted as markup.

/// Escape the five HTML-significant characters.
///
/// Equivalent to replacing `&`, `<`, `>`, `"`, `'` in that order, so an
/// ampersand introduced by an entity is never escaped twice.
pub fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + text.len() / 8);
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#039;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Escape a text segment but keep `> ` blockquote markers at line starts.
///
/// `at_line_start` tells whether the segment begins at the start of a line of
/// the full document (a segment that follows a code block usually does not).
pub fn escape_preserving_quotes(segment: &str, at_line_start: bool) -> String {
  let mut out = String::with_capacity(segment.len());
  for (i, line) in segment.split('\n').enumerate() {
    if i > 0 {
      out.push('\n');
    }
    let line_start = i > 0 || at_line_start;
    match line.strip_prefix("> ") {
      Some(rest) if line_start => {
        out.push_str("> ");
        out.push_str(&escape_html(rest));
      }
      _ => out.push_str(&escape_html(line)),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_all_five_characters() {
    assert_eq!(
      escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
    );
  }

  #[test]
  fn existing_entities_are_escaped_once() {
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
  }

  #[test]
  fn quote_marker_survives_only_at_line_start() {
    assert_eq!(escape_preserving_quotes("> a<b\nx > y", true), "> a&lt;b\nx &gt; y");
    assert_eq!(escape_preserving_quotes("> tail\n> next", false), "&gt; tail\n> next");
  }
}
