//! Grouped reduction: collapse a labelled frame into a ranked table.

use indexmap::IndexMap;
use tide_core::table::{Frame, RankedRow, RankedTable};

/// How the columns of one group are reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
  /// Sum of every cell of every column in the group.
  Sum,
  /// Number of columns in the group.
  Count,
}

/// Column headers of the resulting table.
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a> {
  pub key:   &'a str,
  pub value: &'a str,
}

/// Group the columns of `frame` by the value of label `key`, reduce each
/// group, and rank the groups by descending value.
///
/// Columns without the `key` label belong to no group. Groups whose value is
/// NaN or below `min_value` are dropped. Ties keep first-appearance order.
pub fn grouped_reduction(
  frame: &Frame,
  key: &str,
  reducer: Reducer,
  min_value: f64,
  headers: Headers<'_>,
) -> RankedTable {
  let mut groups: IndexMap<&str, f64> = IndexMap::new();
  for column in &frame.columns {
    let Some(group) = column.label(key) else {
      continue;
    };
    let value = match reducer {
      Reducer::Sum => column.total(),
      Reducer::Count => 1.0,
    };
    *groups.entry(group).or_insert(0.0) += value;
  }

  let mut rows: Vec<RankedRow> = groups
    .into_iter()
    .filter(|(_, value)| !value.is_nan() && *value >= min_value)
    .map(|(group, value)| RankedRow {
      key: group.to_string(),
      value,
    })
    .collect();
  rows.sort_by(|a, b| b.value.total_cmp(&a.value));

  RankedTable {
    key_header: headers.key.to_string(),
    value_header: headers.value.to_string(),
    rows,
  }
}
