//! Line classification and grouping for tables and lists.
//!
//! Both passes walk the document once, classify every line, accumulate a pending
//! group while the classification holds and flush it when it changes or the
//! input ends.

use std::sync::LazyLock;

use regex::Regex;

static TABLE_ROW_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\|(.+)\|$").expect("table row pattern"));
static SEPARATOR_CELL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[-:]+$").expect("separator cell pattern"));
static ORDERED_ITEM_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[0-9]+\. (.+)$").expect("ordered item pattern"));

#[derive(Debug, PartialEq)]
enum TableLine<'a> {
  Row(Vec<&'a str>),
  Separator,
  Other(&'a str),
}

fn classify_table_line(line: &str) -> TableLine<'_> {
  let Some(caps) = TABLE_ROW_RE.captures(line) else {
    return TableLine::Other(line);
  };
  let inner = caps.get(1).map_or("", |m| m.as_str());
  // The outer pipes are consumed by the pattern, so only interior cells remain.
  let cells: Vec<&str> = inner.split('|').map(str::trim).collect();
  if cells.iter().all(|c| SEPARATOR_CELL_RE.is_match(c)) {
    TableLine::Separator
  } else {
    TableLine::Row(cells)
  }
}

#[derive(Default)]
struct TableRun<'a> {
  rows: Vec<Vec<&'a str>>,
  has_separator: bool,
}

impl TableRun<'_> {
  fn flush_into(self, out: &mut Vec<String>) {
    match self.rows.as_slice() {
      [] => {}
      [only] if !self.has_separator => out.push(cells_html(only, "td")),
      [head, body @ ..] => {
        let mut html = String::from("<table><thead><tr>");
        html.push_str(&cells_html(head, "th"));
        html.push_str("</tr></thead><tbody>");
        for row in body {
          html.push_str("<tr>");
          html.push_str(&cells_html(row, "td"));
          html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        out.push(html);
      }
    }
  }
}

fn cells_html(cells: &[&str], tag: &str) -> String {
  cells.iter().map(|c| format!("<{tag}>{c}</{tag}>")).collect()
}

/// Convert pipe-delimited rows to cells and wrap runs of them into tables.
///
/// A run gets a `<table>` when it has a separator row or at least two rows.
/// A lone row without a separator is left as a bare line of `<td>` cells.
/// Separator rows never produce output.
pub fn group_tables(input: &str) -> String {
  let mut out = Vec::new();
  let mut run: Option<TableRun<'_>> = None;
  for line in input.split('\n') {
    match classify_table_line(line) {
      TableLine::Row(cells) => run.get_or_insert_with(TableRun::default).rows.push(cells),
      TableLine::Separator => run.get_or_insert_with(TableRun::default).has_separator = true,
      TableLine::Other(text) => {
        if let Some(pending) = run.take() {
          pending.flush_into(&mut out);
        }
        out.push(text.to_string());
      }
    }
  }
  if let Some(pending) = run.take() {
    pending.flush_into(&mut out);
  }
  out.join("\n")
}

fn list_item_text(line: &str) -> Option<&str> {
  if let Some(rest) = line.strip_prefix("- ") {
    return (!rest.is_empty()).then_some(rest);
  }
  ORDERED_ITEM_RE
    .captures(line)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

/// Turn `- item` and `1. item` lines into `<li>` and wrap each run in one `<ul>`.
///
/// Ordered items intentionally render as `<ul>` too.
pub fn group_list_items(input: &str) -> String {
  fn flush(items: &mut Vec<&str>, out: &mut Vec<String>) {
    if items.is_empty() {
      return;
    }
    let lis: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    out.push(format!("<ul>{lis}</ul>"));
    items.clear();
  }

  let mut out = Vec::new();
  let mut items = Vec::new();
  for line in input.split('\n') {
    match list_item_text(line) {
      Some(text) => items.push(text),
      None => {
        flush(&mut items, &mut out);
        out.push(line.to_string());
      }
    }
  }
  flush(&mut items, &mut out);
  out.join("\n")
}
