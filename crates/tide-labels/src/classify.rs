//! Resource-type classification of a table's columns.

use std::collections::{BTreeMap, BTreeSet};

use tide_core::{
  label::{LabelSet, RESOURCE},
  resource::ResourceType,
};

use crate::{
  error::{Error, Result},
  serialize::encode_header,
};

pub(crate) fn classify<'a, I>(
  label_sets: I,
  type_strings: &BTreeMap<ResourceType, String>,
) -> Result<ResourceType>
where
  I: IntoIterator<Item = &'a LabelSet>,
{
  let mut raw_types = BTreeSet::new();
  for labels in label_sets {
    let raw = labels
      .get(RESOURCE)
      .ok_or_else(|| Error::MissingResource(encode_header(labels)))?;
    raw_types.insert(raw);
  }

  let mut raw_types = raw_types.into_iter();
  let raw = raw_types.next().ok_or(Error::NoColumns)?;
  if raw_types.len() > 0 {
    let mut all = vec![raw.to_string()];
    all.extend(raw_types.map(str::to_string));
    return Err(Error::InconsistentResource(all));
  }

  type_strings
    .iter()
    .find(|(_, value)| value.as_str() == raw)
    .map(|(resource, _)| resource.clone())
    .ok_or_else(|| Error::UnknownResource {
      raw:   raw.to_string(),
      known: type_strings.keys().map(ToString::to_string).collect(),
    })
}
