//! Namespaces seen across every dataset of a period.

use std::collections::BTreeSet;

use tide_core::{
  identifier::{AnalysisIdentifier, Identifier},
  label::NAMESPACE,
  resource::ResourceType,
  table::Payload,
};
use tide_repo::{DataBlock, Resolver, Result, expect_frame, expect_list};

use crate::names;

/// Sorted union of the namespace labels of the sources of every configured
/// resource type in the block's period.
pub(crate) fn list(block: &DataBlock, ctx: &mut Resolver<'_>) -> Result<Payload> {
  let source = block.source()?.clone();
  let resources: Vec<ResourceType> =
    ctx.settings().type_strings.keys().cloned().collect();

  let mut namespaces = BTreeSet::new();
  for resource in resources {
    let id: Identifier = source.sibling(resource).into();
    let data = ctx.get_data(&id)?;
    namespaces.extend(
      expect_frame(&id, &data)?
        .label_values(NAMESPACE)
        .map(str::to_string),
    );
  }

  Ok(Payload::List(namespaces.into_iter().collect()))
}

pub(crate) fn count(block: &DataBlock, ctx: &mut Resolver<'_>) -> Result<Payload> {
  let id: Identifier =
    AnalysisIdentifier::new(block.id.clone(), names::UNIQUE_NS_LIST).into();
  let data = ctx.get_data(&id)?;
  Ok(Payload::Scalar(expect_list(&id, &data)?.len() as f64))
}
