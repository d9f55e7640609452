//! Job counts per namespace.
//!
//! A job is one column with a distinct `uid` label and positive usage.

use tide_core::{
  identifier::Identifier,
  label::{NAMESPACE, UID},
  resource::ResourceType,
  table::{Frame, Payload, RankedTable},
};
use tide_repo::{DataBlock, Resolver, Result, expect_frame};

use crate::{
  dedup::{active_ids, cross_dataset_dedup},
  names,
  reduce::{Headers, Reducer, grouped_reduction},
  sibling_total,
};

const HEADERS: Headers<'static> = Headers {
  key:   "Namespace",
  value: "Count",
};

fn count(frame: &Frame, min_value: f64) -> RankedTable {
  grouped_reduction(frame, NAMESPACE, Reducer::Count, min_value, HEADERS)
}

pub(crate) fn by_namespace(
  block: &DataBlock,
  ctx: &mut Resolver<'_>,
) -> Result<Payload> {
  let frame = cross_dataset_dedup(block.frame()?.clone(), UID, None);
  Ok(Payload::Ranked(count(&frame, ctx.settings().min_value)))
}

/// Jobs of this dataset whose `uid` never shows up with positive usage in the
/// GPU dataset of the same period.
pub(crate) fn cpu_only(block: &DataBlock, ctx: &mut Resolver<'_>) -> Result<Payload> {
  let gpu: Identifier = block.source()?.sibling(ResourceType::gpu()).into();
  let gpu_data = ctx.get_data(&gpu)?;
  let exclude = active_ids(expect_frame(&gpu, &gpu_data)?, UID);
  tracing::debug!(excluded = exclude.len(), "collected gpu uids");

  let frame = cross_dataset_dedup(block.frame()?.clone(), UID, Some(&exclude));
  Ok(Payload::Ranked(count(&frame, ctx.settings().min_value)))
}

pub(crate) fn total(block: &DataBlock, ctx: &mut Resolver<'_>) -> Result<Payload> {
  let name = names::jobs(&block.source()?.resource);
  sibling_total(block, ctx, name)
}
