//! Error types for the tide-labels codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("header is not wrapped in braces: {0}")]
  MissingBraces(String),

  #[error("malformed label pair {pair:?} in header {header}")]
  MalformedPair { header: String, pair: String },

  #[error("stray quote in label pair {pair:?} of header {header}")]
  StrayQuote { header: String, pair: String },

  #[error("table has no columns to classify")]
  NoColumns,

  #[error("column {0} doesn't have a resource label")]
  MissingResource(String),

  #[error(
    "columns yielded more than one resource type: {0:?}; all columns of a \
     table must share one"
  )]
  InconsistentResource(Vec<String>),

  #[error("couldn't map resource string {raw:?} to a known type {known:?}")]
  UnknownResource { raw: String, known: Vec<String> },

  #[error("column {header} has {found} cells, the time index has {expected}")]
  RaggedColumn {
    header:   String,
    expected: usize,
    found:    usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
