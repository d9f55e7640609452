//! The JSON document printed after a run.

use serde::Serialize;
use tide_core::{identifier::Identifier, table::Payload};
use tide_repo::{DataRepository, Ingested, Metadata, Result};

#[derive(Debug, Serialize)]
pub struct SourceReport {
  pub id:       String,
  pub warnings: Vec<String>,
}

impl From<&Ingested> for SourceReport {
  fn from(ingested: &Ingested) -> Self {
    Self {
      id:       ingested.id.to_string(),
      warnings: ingested.warnings.iter().map(ToString::to_string).collect(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ResultEntry {
  /// Display form, e.g. `cpuhours(sourcedata cpu:1704067200-1706745599)`.
  pub id:         String,
  pub identifier: Identifier,
  pub metadata:   Metadata,
  pub data:       Payload,
}

#[derive(Debug, Default, Serialize)]
pub struct Report {
  pub sources: Vec<SourceReport>,
  pub results: Vec<ResultEntry>,
}

impl Report {
  /// Collect the cached result and metadata of every id in `resolved`.
  pub fn collect(
    repo: &mut DataRepository,
    ingested: &[Ingested],
    resolved: &[Identifier],
  ) -> Result<Self> {
    let mut results = Vec::with_capacity(resolved.len());
    for id in resolved {
      let data = repo.get_data(id)?;
      let metadata = repo.get_metadata(id)?.clone();
      results.push(ResultEntry {
        id: id.to_string(),
        identifier: id.clone(),
        metadata,
        data: Payload::clone(&data),
      });
    }
    Ok(Self {
      sources: ingested.iter().map(SourceReport::from).collect(),
      results,
    })
  }
}
