//! Registry of named analysis functions.

use std::{collections::HashMap, fmt, rc::Rc};

use tide_core::{identifier::IdentifierKind, table::Payload};

use crate::{DataBlock, Resolver, Result};

/// A registered analysis: a pure function of its [`DataBlock`] that may ask
/// the [`Resolver`] for other identifiers.
pub type AnalysisFn = Rc<dyn Fn(&DataBlock, &mut Resolver<'_>) -> Result<Payload>>;

/// Maps `(kind of the identifier analysed, analysis name)` to a function.
///
/// The same name may be registered for several kinds; the kind of an
/// analysis identifier's `on` picks the implementation.
#[derive(Default, Clone)]
pub struct AnalysisRegistry {
  functions: HashMap<(IdentifierKind, String), AnalysisFn>,
}

impl AnalysisRegistry {
  pub fn new() -> Self { Self::default() }

  /// Register `function` as `name` for identifiers of kind `on`, replacing
  /// any previous registration.
  pub fn register<F>(
    &mut self,
    on: IdentifierKind,
    name: impl Into<String>,
    function: F,
  ) -> &mut Self
  where
    F: Fn(&DataBlock, &mut Resolver<'_>) -> Result<Payload> + 'static,
  {
    let name = name.into();
    if self
      .functions
      .insert((on, name.clone()), Rc::new(function))
      .is_some()
    {
      tracing::warn!(%on, name = name.as_str(), "analysis registration replaced");
    }
    self
  }

  pub fn get(&self, on: IdentifierKind, name: &str) -> Option<AnalysisFn> {
    self.functions.get(&(on, name.to_string())).cloned()
  }

  /// Registered `(kind, name)` pairs, sorted.
  pub fn names(&self) -> Vec<(IdentifierKind, &str)> {
    let mut names: Vec<_> = self
      .functions
      .keys()
      .map(|(kind, name)| (*kind, name.as_str()))
      .collect();
    names.sort();
    names
  }
}

impl fmt::Debug for AnalysisRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AnalysisRegistry")
      .field("functions", &self.names())
      .finish()
  }
}
