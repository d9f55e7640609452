//! Header parser.
//!
//! Pipeline:
//!   `{k1="v1", k2="v2"}`
//!     └─ strip braces
//!          └─ split_pairs()  → [`k1="v1"`, `k2="v2"`]
//!               └─ split on first `=`, unquote value → LabelSet
//!
//! Values are never escaped, so a `"` left inside a key or value after
//! unquoting is rejected.

use tide_core::label::LabelSet;

use crate::error::{Error, Result};

/// Split on `", "` separators that are not inside a double-quoted value.
fn split_pairs(s: &str) -> Vec<&str> {
  let mut result = Vec::new();
  let mut start = 0usize;
  let mut in_quotes = false;
  let mut chars = s.char_indices().peekable();
  while let Some((i, c)) = chars.next() {
    match c {
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes && matches!(chars.peek(), Some((_, ' '))) => {
        result.push(&s[start..i]);
        chars.next();
        start = i + 2;
      }
      _ => {}
    }
  }
  result.push(&s[start..]);
  result
}

/// Remove one layer of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
  value
    .strip_prefix('"')
    .and_then(|v| v.strip_suffix('"'))
    .unwrap_or(value)
}

pub(crate) fn parse_header(header: &str) -> Result<LabelSet> {
  let trimmed = header.trim();
  let inner = trimmed
    .strip_prefix('{')
    .and_then(|s| s.strip_suffix('}'))
    .ok_or_else(|| Error::MissingBraces(header.to_string()))?;

  let mut labels = LabelSet::new();
  if inner.trim().is_empty() {
    return Ok(labels);
  }

  for pair in split_pairs(inner) {
    let (key, value) =
      pair.split_once('=').ok_or_else(|| Error::MalformedPair {
        header: header.to_string(),
        pair:   pair.to_string(),
      })?;
    let (key, value) = (key.trim(), unquote(value));
    if key.contains('"') || value.contains('"') {
      return Err(Error::StrayQuote {
        header: header.to_string(),
        pair:   pair.to_string(),
      });
    }
    labels.insert(key, value);
  }

  Ok(labels)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_pairs_in_order() {
    let labels = parse_header(
      r#"{namespace="ml-lab", pod="trainer-0", resource="cpu", uid="u1"}"#,
    )
    .unwrap();
    let pairs: Vec<(&str, &str)> = labels.iter().collect();
    assert_eq!(pairs, [
      ("namespace", "ml-lab"),
      ("pod", "trainer-0"),
      ("resource", "cpu"),
      ("uid", "u1"),
    ]);
  }

  #[test]
  fn splits_only_on_first_equals() {
    let labels = parse_header(r#"{query="a=b", uid="u1"}"#).unwrap();
    assert_eq!(labels.get("query"), Some("a=b"));
  }

  #[test]
  fn separator_inside_quotes_is_kept() {
    let labels = parse_header(r#"{note="x, y", uid="u1"}"#).unwrap();
    assert_eq!(labels.get("note"), Some("x, y"));
    assert_eq!(labels.get("uid"), Some("u1"));
  }

  #[test]
  fn unquoted_value_is_taken_verbatim() {
    let labels = parse_header("{resource=cpu}").unwrap();
    assert_eq!(labels.get("resource"), Some("cpu"));
  }

  #[test]
  fn empty_braces_yield_empty_set() {
    assert!(parse_header("{}").unwrap().is_empty());
  }

  #[test]
  fn missing_braces_is_an_error() {
    assert!(matches!(
      parse_header(r#"namespace="a""#),
      Err(Error::MissingBraces(_))
    ));
    assert!(matches!(
      parse_header(r#"{namespace="a""#),
      Err(Error::MissingBraces(_))
    ));
  }

  #[test]
  fn stray_quote_is_an_error() {
    for header in [r#"{a=q", b=r}"#, r#"{a="x""y"}"#, r#"{a"b="c"}"#] {
      assert!(
        matches!(parse_header(header), Err(Error::StrayQuote { .. })),
        "accepted {header}"
      );
    }
  }

  #[test]
  fn pair_without_equals_is_an_error() {
    let err = parse_header(r#"{namespace="a", broken}"#).unwrap_err();
    let Error::MalformedPair { pair, .. } = err else {
      panic!("expected MalformedPair")
    };
    assert_eq!(pair, "broken");
  }
}
