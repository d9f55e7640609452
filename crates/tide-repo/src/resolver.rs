//! The context handed to analysis functions.

use std::rc::Rc;

use tide_core::{identifier::Identifier, settings::Settings, table::Payload};

use crate::{DataRepository, Metadata, Result, expect_scalar};

/// Explicit access to the repository from inside an analysis.
///
/// Every request goes through the resolution stack of the analysis that is
/// currently running, so nested requests are depth-bounded and a request
/// for an identifier already being resolved fails as a cycle.
pub struct Resolver<'r> {
  pub(crate) repo:  &'r mut DataRepository,
  pub(crate) stack: &'r mut Vec<Identifier>,
}

impl Resolver<'_> {
  /// Resolve `id`, computing it (and its dependencies) if needed.
  pub fn get_data(&mut self, id: &Identifier) -> Result<Rc<Payload>> {
    self.repo.resolve(id, self.stack)
  }

  /// Resolve `id` and require a scalar result.
  pub fn get_scalar(&mut self, id: &Identifier) -> Result<f64> {
    let payload = self.get_data(id)?;
    expect_scalar(id, &payload)
  }

  pub fn get_metadata(&self, id: &Identifier) -> Result<&Metadata> {
    self.repo.get_metadata(id)
  }

  pub fn settings(&self) -> &Settings { self.repo.settings() }
}
