//! Identifiers: the structural keys of the data repository.
//!
//! Every artifact the engine knows about, raw or computed, is addressed by an
//! [`Identifier`]. Identifiers are plain immutable values: two identifiers
//! built from the same fields are equal and hash the same, no matter where
//! they were constructed.
//!
//! Analysis identifiers nest. `cpuhourstotal(cpuhours(sourcedata cpu:…))` is
//! an [`AnalysisIdentifier`] whose `on` is another analysis identifier, whose
//! `on` is finally a [`SourceIdentifier`]. Chains rooted at a
//! [`SummaryIdentifier`] describe cross-type (meta) results instead.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  period::Period,
  resource::ResourceType,
};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// The variant tag of an [`Identifier`]. Analyses are registered per kind of
/// the identifier they run on.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
  Source,
  Analysis,
  Vis,
  Summary,
}

impl fmt::Display for IdentifierKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Source => "source",
      Self::Analysis => "analysis",
      Self::Vis => "vis",
      Self::Summary => "summary",
    })
  }
}

// ─── Variants ────────────────────────────────────────────────────────────────

/// One ingested dataset: one resource type over one period.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SourceIdentifier {
  pub start_ts: i64,
  pub end_ts:   i64,
  #[serde(rename = "type")]
  pub resource: ResourceType,
}

impl SourceIdentifier {
  pub fn new(period: Period, resource: ResourceType) -> Self {
    Self {
      start_ts: period.start_ts,
      end_ts: period.end_ts,
      resource,
    }
  }

  pub fn period(&self) -> Period { Period::new(self.start_ts, self.end_ts) }

  /// The source for `resource` covering the same period as `self`.
  pub fn sibling(&self, resource: ResourceType) -> Self {
    Self::new(self.period(), resource)
  }
}

/// The result of applying a named analysis to another identifier.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AnalysisIdentifier {
  pub on:       Box<Identifier>,
  pub analysis: String,
}

impl AnalysisIdentifier {
  pub fn new(on: impl Into<Identifier>, analysis: impl Into<String>) -> Self {
    Self {
      on:       Box::new(on.into()),
      analysis: analysis.into(),
    }
  }

  /// Follow `on` until the first identifier that is not itself an analysis.
  pub fn root(&self) -> &Identifier {
    let mut on = self.on.as_ref();
    while let Identifier::Analysis(inner) = on {
      on = inner.on.as_ref();
    }
    on
  }

  /// The [`SourceIdentifier`] this chain of analyses is based on.
  ///
  /// Fails with [`Error::BrokenChain`] when the chain ends at anything other
  /// than a source (a summary or a visualization).
  pub fn find_source(&self) -> Result<&SourceIdentifier> {
    match self.root() {
      Identifier::Source(source) => Ok(source),
      _ => Err(Error::BrokenChain(self.to_string())),
    }
  }

  /// True for cross-type results, i.e. chains rooted at a summary.
  pub fn is_meta(&self) -> bool {
    matches!(self.root(), Identifier::Summary(_))
  }
}

/// A rendering of an analysis result.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VisIdentifier {
  pub of:         Box<Identifier>,
  pub graph_type: String,
}

impl VisIdentifier {
  pub fn new(of: impl Into<Identifier>, graph_type: impl Into<String>) -> Self {
    Self {
      of:         Box::new(of.into()),
      graph_type: graph_type.into(),
    }
  }
}

/// A cross-type summary of one period. `start_ts`/`end_ts` match the
/// corresponding sources.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
pub struct SummaryIdentifier {
  pub start_ts: i64,
  pub end_ts:   i64,
}

impl SummaryIdentifier {
  pub fn new(period: Period) -> Self {
    Self {
      start_ts: period.start_ts,
      end_ts:   period.end_ts,
    }
  }

  pub fn period(&self) -> Period { Period::new(self.start_ts, self.end_ts) }
}

// ─── Identifier ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identifier {
  Source(SourceIdentifier),
  Analysis(AnalysisIdentifier),
  Vis(VisIdentifier),
  Summary(SummaryIdentifier),
}

impl Identifier {
  pub fn kind(&self) -> IdentifierKind {
    match self {
      Self::Source(_) => IdentifierKind::Source,
      Self::Analysis(_) => IdentifierKind::Analysis,
      Self::Vis(_) => IdentifierKind::Vis,
      Self::Summary(_) => IdentifierKind::Summary,
    }
  }

  /// The period covered by the root of this identifier, if it has one.
  pub fn period(&self) -> Option<Period> {
    match self {
      Self::Source(s) => Some(s.period()),
      Self::Summary(s) => Some(s.period()),
      Self::Analysis(a) => match a.root() {
        Self::Source(s) => Some(s.period()),
        Self::Summary(s) => Some(s.period()),
        _ => None,
      },
      Self::Vis(v) => v.of.period(),
    }
  }

  pub fn as_source(&self) -> Option<&SourceIdentifier> {
    match self {
      Self::Source(s) => Some(s),
      _ => None,
    }
  }
}

impl From<SourceIdentifier> for Identifier {
  fn from(id: SourceIdentifier) -> Self { Self::Source(id) }
}

impl From<AnalysisIdentifier> for Identifier {
  fn from(id: AnalysisIdentifier) -> Self { Self::Analysis(id) }
}

impl From<VisIdentifier> for Identifier {
  fn from(id: VisIdentifier) -> Self { Self::Vis(id) }
}

impl From<SummaryIdentifier> for Identifier {
  fn from(id: SummaryIdentifier) -> Self { Self::Summary(id) }
}

// ─── Display ─────────────────────────────────────────────────────────────────

impl fmt::Display for SourceIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "sourcedata {}:{}-{}", self.resource, self.start_ts, self.end_ts)
  }
}

impl fmt::Display for AnalysisIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}({})", self.analysis, self.on)
  }
}

impl fmt::Display for VisIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "vis of {}", self.of)
  }
}

impl fmt::Display for SummaryIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "summary of {}-{}", self.start_ts, self.end_ts)
  }
}

impl fmt::Display for Identifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Source(id) => id.fmt(f),
      Self::Analysis(id) => id.fmt(f),
      Self::Vis(id) => id.fmt(f),
      Self::Summary(id) => id.fmt(f),
    }
  }
}
