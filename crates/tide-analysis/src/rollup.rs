//! Cross-type totals computed on a period summary.

use tide_core::{
  identifier::{AnalysisIdentifier, SourceIdentifier},
  resource::ResourceType,
  table::Payload,
};
use tide_repo::{DataBlock, Error, Resolver, Result};

use crate::names;

/// Sum the scalar `name_for(type)` over every configured resource type of the
/// period. A type without a source for the period fails the rollup.
fn sum_over_types(
  block: &DataBlock,
  ctx: &mut Resolver<'_>,
  name_for: fn(&ResourceType) -> String,
) -> Result<Payload> {
  let period = block
    .period
    .ok_or_else(|| Error::NotFound(format!("period of {}", block.id)))?;
  let resources: Vec<ResourceType> =
    ctx.settings().type_strings.keys().cloned().collect();

  let mut total = 0.0;
  for resource in resources {
    let name = name_for(&resource);
    let id = AnalysisIdentifier::new(SourceIdentifier::new(period, resource), name);
    total += ctx.get_scalar(&id.into())?;
  }
  Ok(Payload::Scalar(total))
}

pub(crate) fn all_jobs_total(
  block: &DataBlock,
  ctx: &mut Resolver<'_>,
) -> Result<Payload> {
  sum_over_types(block, ctx, names::jobs_total)
}

pub(crate) fn all_hours_total(
  block: &DataBlock,
  ctx: &mut Resolver<'_>,
) -> Result<Payload> {
  sum_over_types(block, ctx, names::hours_total)
}
