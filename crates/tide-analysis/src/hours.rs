//! Usage hours per namespace.

use tide_core::{label::NAMESPACE, table::Payload};
use tide_repo::{DataBlock, Resolver, Result};

use crate::{
  names,
  reduce::{Headers, Reducer, grouped_reduction},
  sibling_total,
};

const HEADERS: Headers<'static> = Headers {
  key:   "Namespace",
  value: "Hours",
};

/// Summed usage of every namespace, ranked.
pub(crate) fn by_namespace(
  block: &DataBlock,
  ctx: &mut Resolver<'_>,
) -> Result<Payload> {
  let min_value = ctx.settings().min_value;
  let table =
    grouped_reduction(block.frame()?, NAMESPACE, Reducer::Sum, min_value, HEADERS);
  Ok(Payload::Ranked(table))
}

/// Total hours of the dataset, from its per-namespace table.
pub(crate) fn total(block: &DataBlock, ctx: &mut Resolver<'_>) -> Result<Payload> {
  let name = names::hours(&block.source()?.resource);
  sibling_total(block, ctx, name)
}
