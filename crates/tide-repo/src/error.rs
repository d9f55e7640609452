//! Error type for `tide-repo`.

use thiserror::Error;
use tide_core::identifier::IdentifierKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tide_core::Error),

  #[error("label error: {0}")]
  Labels(#[from] tide_labels::Error),

  #[error("identifier not found: {0}")]
  NotFound(String),

  #[error("no analysis {analysis:?} registered for {kind} identifiers ({id})")]
  NoAnalysis {
    kind:     IdentifierKind,
    analysis: String,
    id:       String,
  },

  #[error("identifier already registered: {0}")]
  Duplicate(String),

  #[error("dependency cycle: {0}")]
  Cycle(String),

  #[error("resolution depth {depth} exceeded while resolving {id}")]
  DepthExceeded { depth: usize, id: String },

  #[error("{id} holds a {found} payload, expected {expected}")]
  UnexpectedPayload {
    id:       String,
    expected: &'static str,
    found:    &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
