//! Codec for monitoring-style column headers.
//!
//! Column headers look like `{namespace="ml-lab", resource="cpu", uid="…"}`.
//! This crate turns them into [`LabelSet`]s and back, decides which logical
//! [`ResourceType`] a whole table belongs to, and assembles raw columns into
//! a [`Frame`]. Pure and synchronous.
//!
//! # Quick start
//!
//! ```
//! let labels = tide_labels::parse(r#"{namespace="a", resource="cpu"}"#).unwrap();
//! assert_eq!(labels.get("namespace"), Some("a"));
//! assert_eq!(tide_labels::encode(&labels), r#"{namespace="a", resource="cpu"}"#);
//! ```

mod classify;
pub mod error;
mod parse;
mod serialize;

use std::collections::BTreeMap;

pub use error::{Error, Result};
use tide_core::{
  label::LabelSet,
  resource::ResourceType,
  table::{Frame, Series},
};

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Parse one column header into its labels.
///
/// Fails with [`Error::MissingBraces`] if the header isn't wrapped in `{}`,
/// with [`Error::MalformedPair`] if a pair lacks `=`, and with
/// [`Error::StrayQuote`] if a key or value holds an unescaped `"`.
pub fn parse(header: &str) -> Result<LabelSet> { parse::parse_header(header) }

/// Encode labels back into header form, quoting every value.
pub fn encode(labels: &LabelSet) -> String { serialize::encode_header(labels) }

/// Decide the single resource type shared by every column.
///
/// `type_strings` maps each logical type to the raw string found in the
/// `resource` label. Every column must carry that label, all columns must
/// agree on it, and the raw value must appear in `type_strings`.
pub fn classify_resource_type<'a, I>(
  label_sets: I,
  type_strings: &BTreeMap<ResourceType, String>,
) -> Result<ResourceType>
where
  I: IntoIterator<Item = &'a LabelSet>,
{
  classify::classify(label_sets, type_strings)
}

/// Build a [`Frame`] from a time index and `(header, cells)` columns.
///
/// Every header is parsed; a column whose length differs from the time
/// index is rejected with [`Error::RaggedColumn`].
pub fn decode_frame<H, I>(time: Vec<i64>, columns: I) -> Result<Frame>
where
  H: AsRef<str>,
  I: IntoIterator<Item = (H, Vec<Option<f64>>)>,
{
  let mut series = Vec::new();
  for (header, values) in columns {
    let header = header.as_ref();
    if values.len() != time.len() {
      return Err(Error::RaggedColumn {
        header:   header.to_string(),
        expected: time.len(),
        found:    values.len(),
      });
    }
    series.push(Series::new(parse(header)?, values));
  }
  tracing::debug!(columns = series.len(), rows = time.len(), "decoded frame");
  Ok(Frame::new(time, series))
}

// ─── Round-trip test ─────────────────────────────────────────────────────────
