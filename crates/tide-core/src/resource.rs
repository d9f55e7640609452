//! Logical resource types a dataset can belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The logical category (e.g. `cpu`, `gpu`) that every column of a source
/// table belongs to.
///
/// Resource types are configuration-driven: the raw label string found in
/// column headers is mapped back to one of these through
/// [`Settings::type_strings`](crate::settings::Settings::type_strings).
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  pub fn cpu() -> Self { Self::new("cpu") }

  pub fn gpu() -> Self { Self::new("gpu") }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ResourceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ResourceType {
  fn from(name: &str) -> Self { Self::new(name) }
}
