//! Label sets decoded from monitoring-style column headers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label key carrying the raw resource string of a column.
pub const RESOURCE: &str = "resource";
/// Label key grouping columns by tenant namespace.
pub const NAMESPACE: &str = "namespace";
/// Label key carrying the unique id of the workload behind a column.
pub const UID: &str = "uid";

/// Ordered key → value labels of a single column, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(IndexMap<String, String>);

impl LabelSet {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  /// Insert a label, replacing (but keeping the position of) any previous
  /// value under the same key.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.0.insert(key.into(), value.into());
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K, V> FromIterator<(K, V)> for LabelSet
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
