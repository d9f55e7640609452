//! [`DataRepository`]: identifier-addressed, write-once result cache.

use std::rc::Rc;

use indexmap::IndexMap;
use tide_core::{
  identifier::{AnalysisIdentifier, Identifier, SourceIdentifier, SummaryIdentifier},
  period::{self, PeriodWarning},
  settings::Settings,
  table::{Frame, Payload},
};

use crate::{AnalysisRegistry, DataBlock, Error, Metadata, Resolver, Result};

#[derive(Debug)]
struct Entry {
  payload:  Rc<Payload>,
  metadata: Metadata,
}

/// The result of [`DataRepository::ingest`].
#[derive(Debug, Clone)]
pub struct Ingested {
  pub id:       SourceIdentifier,
  /// Period normalization warnings raised while ingesting.
  pub warnings: Vec<PeriodWarning>,
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// Maps identifiers to cached payloads and computes missing analysis results
/// on demand.
///
/// Entries are created once and never replaced. Resolution is synchronous
/// and depth-first: an analysis' dependencies are resolved (and cached)
/// before the analysis itself returns. A failed resolution leaves no entry
/// behind, so a later request tries again.
#[derive(Debug)]
pub struct DataRepository {
  entries:  IndexMap<Identifier, Entry>,
  registry: AnalysisRegistry,
  settings: Settings,
}

impl DataRepository {
  pub fn new(settings: Settings, registry: AnalysisRegistry) -> Self {
    Self {
      entries: IndexMap::new(),
      registry,
      settings,
    }
  }

  pub fn settings(&self) -> &Settings { &self.settings }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn contains(&self, id: &Identifier) -> bool {
    self.entries.contains_key(id)
  }

  // ── Sources ───────────────────────────────────────────────────────────

  /// Insert a source table directly.
  ///
  /// Returns [`Error::Duplicate`] if `id` is already registered.
  pub fn register_source(
    &mut self,
    id: SourceIdentifier,
    frame: Frame,
    metadata: Metadata,
  ) -> Result<()> {
    let id = Identifier::Source(id);
    if self.entries.contains_key(&id) {
      return Err(Error::Duplicate(id.to_string()));
    }
    tracing::debug!(%id, columns = frame.columns.len(), "registered source");
    self.entries.insert(id, Entry {
      payload: Rc::new(Payload::Frame(frame)),
      metadata,
    });
    Ok(())
  }

  /// Classify, normalize and register a decoded table in one step.
  pub fn ingest(&mut self, frame: Frame) -> Result<Ingested> {
    let resource = tide_labels::classify_resource_type(
      frame.label_sets(),
      &self.settings.type_strings,
    )?;
    let zone = self.settings.timezone;
    let normalized = period::normalize(zone, &frame.time)?;
    let readable_period = period::readable_period(zone, normalized.period)?;

    let id = SourceIdentifier::new(normalized.period, resource.clone());
    let metadata = Metadata {
      readable_period,
      period: Some(normalized.period),
      resource: Some(resource),
    };
    self.register_source(id.clone(), frame, metadata)?;

    tracing::info!(
      %id,
      warnings = normalized.warnings.len(),
      "ingested source"
    );
    Ok(Ingested {
      id,
      warnings: normalized.warnings,
    })
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The payload for `id`, computing it on first request.
  ///
  /// - Sources must have been registered, otherwise [`Error::NotFound`].
  /// - Summaries resolve to the configured resource types, provided at least
  ///   one source covers their period.
  /// - Analyses run the function registered for the kind of their `on`.
  pub fn get_data(&mut self, id: &Identifier) -> Result<Rc<Payload>> {
    let mut stack = Vec::new();
    self.resolve(id, &mut stack)
  }

  /// Metadata recorded when `id` was registered or computed.
  pub fn get_metadata(&self, id: &Identifier) -> Result<&Metadata> {
    self
      .entries
      .get(id)
      .map(|entry| &entry.metadata)
      .ok_or_else(|| Error::NotFound(id.to_string()))
  }

  /// Known identifiers matching `predicate`, in insertion order. Never
  /// triggers computation.
  pub fn filter_ids<F>(&self, predicate: F) -> Vec<Identifier>
  where
    F: Fn(&Identifier) -> bool,
  {
    self.entries.keys().filter(|id| predicate(*id)).cloned().collect()
  }

  // ── Resolution ────────────────────────────────────────────────────────

  pub(crate) fn resolve(
    &mut self,
    id: &Identifier,
    stack: &mut Vec<Identifier>,
  ) -> Result<Rc<Payload>> {
    if let Some(entry) = self.entries.get(id) {
      tracing::debug!(%id, "cache hit");
      return Ok(Rc::clone(&entry.payload));
    }

    match id {
      Identifier::Source(_) | Identifier::Vis(_) => {
        Err(Error::NotFound(id.to_string()))
      }
      Identifier::Summary(summary) => self.resolve_summary(*summary),
      Identifier::Analysis(analysis) => {
        self.resolve_analysis(id, analysis, stack)
      }
    }
  }

  /// A summary's payload is the configured resource types. It only depends
  /// on settings, so caching it never goes stale when more sources arrive.
  fn resolve_summary(&mut self, summary: SummaryIdentifier) -> Result<Rc<Payload>> {
    let period = summary.period();
    let id = Identifier::Summary(summary);
    let has_source = self
      .entries
      .keys()
      .filter_map(Identifier::as_source)
      .any(|source| source.period() == period);
    if !has_source {
      return Err(Error::NotFound(id.to_string()));
    }

    let resources: Vec<String> = self
      .settings
      .type_strings
      .keys()
      .map(ToString::to_string)
      .collect();
    let metadata = Metadata {
      readable_period: period::readable_period(self.settings.timezone, period)?,
      period:          Some(period),
      resource:        None,
    };
    Ok(self.insert(id, Payload::List(resources), metadata))
  }

  fn resolve_analysis(
    &mut self,
    id: &Identifier,
    analysis: &AnalysisIdentifier,
    stack: &mut Vec<Identifier>,
  ) -> Result<Rc<Payload>> {
    if let Some(pos) = stack.iter().position(|pending| pending == id) {
      let mut chain: Vec<String> =
        stack[pos..].iter().map(ToString::to_string).collect();
      chain.push(id.to_string());
      return Err(Error::Cycle(chain.join(" -> ")));
    }
    if stack.len() >= self.settings.max_depth {
      return Err(Error::DepthExceeded {
        depth: self.settings.max_depth,
        id:    id.to_string(),
      });
    }

    let kind = analysis.on.kind();
    let function = self.registry.get(kind, &analysis.analysis).ok_or_else(|| {
      Error::NoAnalysis {
        kind,
        analysis: analysis.analysis.clone(),
        id: id.to_string(),
      }
    })?;

    tracing::debug!(%id, depth = stack.len(), "resolving");
    stack.push(id.clone());
    let result = self.evaluate(analysis, function.as_ref(), stack);
    stack.pop();
    let (payload, metadata) = result?;

    tracing::debug!(%id, kind = payload.kind_name(), "computed");
    Ok(self.insert(id.clone(), payload, metadata))
  }

  fn evaluate(
    &mut self,
    analysis: &AnalysisIdentifier,
    function: &dyn Fn(&DataBlock, &mut Resolver<'_>) -> Result<Payload>,
    stack: &mut Vec<Identifier>,
  ) -> Result<(Payload, Metadata)> {
    let on = analysis.on.as_ref();
    let data = self.resolve(on, stack)?;
    let metadata = self.get_metadata(on)?.clone();

    let block = DataBlock {
      id: on.clone(),
      data,
      resource: metadata.resource.clone(),
      period: metadata.period,
      readable_period: metadata.readable_period.clone(),
    };

    let mut resolver = Resolver { repo: self, stack };
    let payload = function(&block, &mut resolver)?;
    Ok((payload, metadata))
  }

  fn insert(
    &mut self,
    id: Identifier,
    payload: Payload,
    metadata: Metadata,
  ) -> Rc<Payload> {
    let payload = Rc::new(payload);
    self.entries.insert(id, Entry {
      payload: Rc::clone(&payload),
      metadata,
    });
    payload
  }
}
