//! Inputs handed to analysis functions, and the metadata kept per entry.

use std::rc::Rc;

use serde::Serialize;
use tide_core::{
  identifier::{Identifier, SourceIdentifier},
  period::Period,
  resource::ResourceType,
  table::{Frame, Payload, RankedTable},
};

use crate::{Error, Result};

// ─── Metadata ────────────────────────────────────────────────────────────────

/// Context recorded alongside every repository entry.
///
/// Sources receive theirs at registration; analysis results inherit the
/// metadata of the identifier they were computed on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
  /// e.g. `"January 2024"`.
  pub readable_period: String,
  pub period:          Option<Period>,
  /// Absent for results rooted at a summary.
  pub resource:        Option<ResourceType>,
}

// ─── DataBlock ───────────────────────────────────────────────────────────────

/// The input of one analysis invocation: the resolved data of the identifier
/// the analysis runs on, plus its period and type context.
#[derive(Debug, Clone)]
pub struct DataBlock {
  /// The identifier `data` was resolved from (the analysis' `on`).
  pub id:              Identifier,
  pub data:            Rc<Payload>,
  pub resource:        Option<ResourceType>,
  pub period:          Option<Period>,
  pub readable_period: String,
}

impl DataBlock {
  /// The block's data as a time-series table.
  pub fn frame(&self) -> Result<&Frame> { expect_frame(&self.id, &self.data) }

  /// The source this block is rooted at.
  pub fn source(&self) -> Result<&SourceIdentifier> {
    match &self.id {
      Identifier::Source(source) => Ok(source),
      Identifier::Analysis(analysis) => Ok(analysis.find_source()?),
      other => Err(tide_core::Error::BrokenChain(other.to_string()).into()),
    }
  }
}

// ─── Payload expectations ────────────────────────────────────────────────────

fn unexpected(id: &Identifier, expected: &'static str, found: &Payload) -> Error {
  Error::UnexpectedPayload {
    id: id.to_string(),
    expected,
    found: found.kind_name(),
  }
}

pub fn expect_frame<'p>(id: &Identifier, payload: &'p Payload) -> Result<&'p Frame> {
  payload.as_frame().ok_or_else(|| unexpected(id, "frame", payload))
}

pub fn expect_ranked<'p>(
  id: &Identifier,
  payload: &'p Payload,
) -> Result<&'p RankedTable> {
  payload.as_ranked().ok_or_else(|| unexpected(id, "ranked", payload))
}

pub fn expect_scalar(id: &Identifier, payload: &Payload) -> Result<f64> {
  payload.as_scalar().ok_or_else(|| unexpected(id, "scalar", payload))
}

pub fn expect_list<'p>(id: &Identifier, payload: &'p Payload) -> Result<&'p [String]> {
  payload.as_list().ok_or_else(|| unexpected(id, "list", payload))
}
