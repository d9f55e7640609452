//! Turning the configured analysis plan into identifiers and resolving them.

use tide_core::{
  filter,
  identifier::{AnalysisIdentifier, Identifier, IdentifierKind, SummaryIdentifier},
  period::Period,
};
use tide_repo::{DataRepository, Result};

/// Analysis identifiers requested by the settings for the sources currently
/// registered: the per-type plan for each source, then the summary plan for
/// each distinct period.
pub fn planned(repo: &DataRepository) -> Vec<Identifier> {
  let plan = &repo.settings().analyses;
  let mut planned = Vec::new();
  let mut periods: Vec<Period> = Vec::new();

  for id in repo.filter_ids(filter::of_kind(IdentifierKind::Source)) {
    let Identifier::Source(source) = id else {
      continue;
    };
    if !periods.contains(&source.period()) {
      periods.push(source.period());
    }
    for name in plan.per_type.get(&source.resource).into_iter().flatten() {
      planned.push(AnalysisIdentifier::new(source.clone(), name.as_str()).into());
    }
  }

  for period in periods {
    for name in &plan.summary {
      planned.push(
        AnalysisIdentifier::new(SummaryIdentifier::new(period), name.as_str())
          .into(),
      );
    }
  }

  planned
}

/// Resolve every planned analysis. The first failure aborts the run.
pub fn run_planned(repo: &mut DataRepository) -> Result<Vec<Identifier>> {
  let planned = planned(repo);
  tracing::info!(analyses = planned.len(), "resolving planned analyses");
  for id in &planned {
    repo.get_data(id)?;
  }
  Ok(planned)
}
