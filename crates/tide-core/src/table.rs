//! Tables and result payloads.
//!
//! A source dataset is a [`Frame`]: a time index plus one labelled
//! [`Series`] per column. Analyses return a [`Payload`], which is either a
//! frame, a two-column [`RankedTable`], a scalar or a list of strings.

use serde::{Deserialize, Serialize};

use crate::label::LabelSet;

// ─── Frame ───────────────────────────────────────────────────────────────────

/// One column of a time-series table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
  pub labels: LabelSet,
  /// One cell per entry in [`Frame::time`]; `None` marks a missing sample.
  pub values: Vec<Option<f64>>,
}

impl Series {
  pub fn new(labels: LabelSet, values: Vec<Option<f64>>) -> Self {
    Self { labels, values }
  }

  pub fn label(&self, key: &str) -> Option<&str> { self.labels.get(key) }

  /// Sum of all present cells; missing cells count as zero.
  pub fn total(&self) -> f64 { self.values.iter().flatten().sum() }
}

/// A time-indexed table whose columns carry [`LabelSet`]s.
///
/// The time index is held apart from the columns, so every entry of
/// `columns` is a data column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
  /// Unix timestamps (seconds), ascending.
  pub time:    Vec<i64>,
  pub columns: Vec<Series>,
}

impl Frame {
  pub fn new(time: Vec<i64>, columns: Vec<Series>) -> Self {
    Self { time, columns }
  }

  pub fn label_sets(&self) -> impl Iterator<Item = &LabelSet> {
    self.columns.iter().map(|c| &c.labels)
  }

  /// Values of `key` over all columns, skipping columns without the label.
  pub fn label_values<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Iterator<Item = &'a str> + 'a {
    self.columns.iter().filter_map(move |c| c.label(key))
  }

  /// Keep only the columns for which `keep` returns true.
  pub fn retain_columns<F>(mut self, keep: F) -> Self
  where
    F: FnMut(&Series) -> bool,
  {
    self.columns.retain(keep);
    self
  }
}

// ─── Ranked table ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
  pub key:   String,
  pub value: f64,
}

/// A two-column `(group-key, value)` table, sorted by descending value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTable {
  pub key_header:   String,
  pub value_header: String,
  pub rows:         Vec<RankedRow>,
}

impl RankedTable {
  pub fn total(&self) -> f64 { self.rows.iter().map(|r| r.value).sum() }

  /// `(key, value)` pairs in rank order.
  pub fn pairs(&self) -> Vec<(&str, f64)> {
    self.rows.iter().map(|r| (r.key.as_str(), r.value)).collect()
  }
}

// ─── Payload ─────────────────────────────────────────────────────────────────

/// Everything a repository entry can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Payload {
  Frame(Frame),
  Ranked(RankedTable),
  Scalar(f64),
  List(Vec<String>),
}

impl Payload {
  /// Short name of the variant, used in error messages.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Frame(_) => "frame",
      Self::Ranked(_) => "ranked",
      Self::Scalar(_) => "scalar",
      Self::List(_) => "list",
    }
  }

  pub fn as_frame(&self) -> Option<&Frame> {
    match self {
      Self::Frame(f) => Some(f),
      _ => None,
    }
  }

  pub fn as_ranked(&self) -> Option<&RankedTable> {
    match self {
      Self::Ranked(t) => Some(t),
      _ => None,
    }
  }

  pub fn as_scalar(&self) -> Option<f64> {
    match self {
      Self::Scalar(v) => Some(*v),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[String]> {
    match self {
      Self::List(l) => Some(l.as_slice()),
      _ => None,
    }
  }
}
