//! Predicates for enumerating known identifiers with `DataRepository::filter_ids`.
//!
//! Each function returns a closure over `&Identifier`, so predicates compose
//! with ordinary boolean logic at the call site.

use crate::{
  identifier::{Identifier, IdentifierKind},
  resource::ResourceType,
};

/// Identifiers of the given kind.
pub fn of_kind(kind: IdentifierKind) -> impl Fn(&Identifier) -> bool {
  move |id: &Identifier| id.kind() == kind
}

/// Source identifiers of the given resource type.
pub fn source_of_type(resource: ResourceType) -> impl Fn(&Identifier) -> bool {
  move |id: &Identifier| {
    matches!(id, Identifier::Source(s) if s.resource == resource)
  }
}

/// Analysis identifiers produced by the analysis named `analysis`.
pub fn analysis_named(
  analysis: impl Into<String>,
) -> impl Fn(&Identifier) -> bool {
  let analysis = analysis.into();
  move |id: &Identifier| {
    matches!(id, Identifier::Analysis(a) if a.analysis == analysis)
  }
}

/// Analysis identifiers computed directly on `target`.
pub fn analyses_of(target: Identifier) -> impl Fn(&Identifier) -> bool {
  move |id: &Identifier| matches!(id, Identifier::Analysis(a) if *a.on == target)
}
