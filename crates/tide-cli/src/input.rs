//! JSON input tables.

use indexmap::IndexMap;
use serde::Deserialize;
use tide_core::table::Frame;

/// One exported time-series table.
///
/// ```json
/// {
///   "time":    [1704067200, 1704070800],
///   "columns": { "{namespace=\"a\", resource=\"cpu\"}": [1.0, null] }
/// }
/// ```
///
/// Column order follows the document.
#[derive(Debug, Deserialize)]
pub struct InputTable {
  pub time:    Vec<i64>,
  pub columns: IndexMap<String, Vec<Option<f64>>>,
}

impl InputTable {
  pub fn into_frame(self) -> tide_labels::Result<Frame> {
    tide_labels::decode_frame(self.time, self.columns)
  }
}
