//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with whole lesson bodies; never splits a UTF-8 character.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_are_untouched() {
    assert_eq!(trunc_for_log("print(1)", 20), "print(1)");
  }

  #[test]
  fn cuts_on_char_boundary() {
    // "변수" is 6 bytes; a 4-byte cut lands inside the second character.
    assert_eq!(trunc_for_log("변수", 4), "변… (6 bytes total)");
  }
}
