//! Error types for `tide-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("identifier {0} is not rooted at a source")]
  BrokenChain(String),

  #[error("time index is empty")]
  EmptyRange,

  #[error("timestamp {0} cannot be placed on the calendar")]
  InvalidTimestamp(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
