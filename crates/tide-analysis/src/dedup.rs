//! Cross-dataset workload deduplication by an id label.
//!
//! Workloads are compared across datasets by a unique id label (`uid`).
//! Columns whose aggregate is not positive are treated as noise before any
//! comparison takes place.

use std::collections::{BTreeSet, HashSet};

use tide_core::table::Frame;

/// Drop columns whose summed value is `<= 0`.
pub fn drop_idle(frame: Frame) -> Frame {
  frame.retain_columns(|column| column.total() > 0.0)
}

/// Keep only the first column for each value of `key`. Columns without the
/// label are kept.
pub fn dedup_ids(frame: Frame, key: &str) -> Frame {
  let mut seen = HashSet::new();
  frame.retain_columns(|column| match column.label(key) {
    Some(id) => seen.insert(id.to_string()),
    None => true,
  })
}

/// Ids (label `key`) of the columns that carry any positive usage.
pub fn active_ids(frame: &Frame, key: &str) -> BTreeSet<String> {
  frame
    .columns
    .iter()
    .filter(|column| column.total() > 0.0)
    .filter_map(|column| column.label(key))
    .map(str::to_string)
    .collect()
}

/// Drop idle columns, collapse duplicate ids, then discard every column whose
/// id is in `exclude`.
pub fn cross_dataset_dedup(
  frame: Frame,
  key: &str,
  exclude: Option<&BTreeSet<String>>,
) -> Frame {
  let frame = dedup_ids(drop_idle(frame), key);
  match exclude {
    Some(exclude) => frame.retain_columns(|column| {
      column.label(key).is_none_or(|id| !exclude.contains(id))
    }),
    None => frame,
  }
}
