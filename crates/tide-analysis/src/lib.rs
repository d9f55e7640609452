//! The analyses shipped with Tide.
//!
//! Each analysis is a plain function registered in an
//! [`AnalysisRegistry`] under a name and the kind of identifier it runs on.
//! Per-type analyses work on one source table and may look up the sibling
//! source of another resource type for the same period; rollups run on a
//! period summary and only combine other analyses' results.

pub mod dedup;
pub mod names;
pub mod plan;
pub mod reduce;

mod hours;
mod jobs;
mod namespaces;
mod rollup;

use tide_core::{
  identifier::{AnalysisIdentifier, Identifier, IdentifierKind},
  settings::Settings,
  table::Payload,
};
use tide_repo::{AnalysisRegistry, DataBlock, Resolver, Result, expect_ranked};

pub use plan::{planned, run_planned};

/// Total of the ranked table produced by analysis `name` on the same
/// identifier as `block`.
fn sibling_total(
  block: &DataBlock,
  ctx: &mut Resolver<'_>,
  name: String,
) -> Result<Payload> {
  let id: Identifier = AnalysisIdentifier::new(block.id.clone(), name).into();
  let data = ctx.get_data(&id)?;
  Ok(Payload::Scalar(expect_ranked(&id, &data)?.total()))
}

/// Register every default analysis, per-type ones once for each resource
/// type in `settings.type_strings`.
pub fn register_defaults(registry: &mut AnalysisRegistry, settings: &Settings) {
  use IdentifierKind::{Source, Summary};

  for resource in settings.type_strings.keys() {
    registry
      .register(Source, names::hours(resource), hours::by_namespace)
      .register(Source, names::hours_total(resource), hours::total)
      .register(Source, names::jobs(resource), jobs::by_namespace)
      .register(Source, names::jobs_total(resource), jobs::total);
  }

  registry
    .register(Source, names::CPU_ONLY_JOBS, jobs::cpu_only)
    .register(Source, names::UNIQUE_NS_LIST, namespaces::list)
    .register(Source, names::UNIQUE_NS_COUNT, namespaces::count)
    .register(Summary, names::ALL_JOBS_TOTAL, rollup::all_jobs_total)
    .register(Summary, names::ALL_HOURS_TOTAL, rollup::all_hours_total);
}

pub fn default_registry(settings: &Settings) -> AnalysisRegistry {
  let mut registry = AnalysisRegistry::new();
  register_defaults(&mut registry, settings);
  registry
}
