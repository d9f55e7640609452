//! The memoizing data repository.
//!
//! [`DataRepository`] maps [`Identifier`](tide_core::identifier::Identifier)s
//! to write-once entries. Sources are registered up front; analysis results
//! are computed lazily on first request by the function registered in the
//! [`AnalysisRegistry`], which may request further identifiers through its
//! [`Resolver`] before returning.

mod block;
mod registry;
mod repository;
mod resolver;

pub mod error;

pub use block::{
  DataBlock, Metadata, expect_frame, expect_list, expect_ranked, expect_scalar,
};
pub use error::{Error, Result};
pub use registry::{AnalysisFn, AnalysisRegistry};
pub use repository::{DataRepository, Ingested};
pub use resolver::Resolver;

#[cfg(test)]
mod tests;
