//! Tests for `DataRepository` resolution, caching and ingestion.

use std::{cell::Cell, rc::Rc};

use tide_core::{
  filter,
  identifier::{
    AnalysisIdentifier, Identifier, IdentifierKind, SourceIdentifier,
    SummaryIdentifier,
  },
  period::{Period, PeriodWarning, Zone},
  resource::ResourceType,
  settings::Settings,
  table::{Frame, Payload},
};

use crate::{AnalysisRegistry, DataRepository, Error, Metadata, expect_scalar};

const JAN_1: i64 = 1_704_067_200;
const JAN_31_END: i64 = 1_706_745_599;

fn settings() -> Settings {
  Settings {
    timezone: Zone::Utc,
    max_depth: 8,
    ..Settings::default()
  }
}

fn january() -> Period { Period::new(JAN_1, JAN_31_END) }

fn source(resource: ResourceType) -> SourceIdentifier {
  SourceIdentifier::new(january(), resource)
}

fn frame(resource: &str) -> Frame {
  tide_labels::decode_frame(vec![JAN_1, JAN_31_END], [
    (
      format!(r#"{{namespace="a", resource="{resource}", uid="u1"}}"#),
      vec![Some(1.0), Some(2.0)],
    ),
    (
      format!(r#"{{namespace="b", resource="{resource}", uid="u2"}}"#),
      vec![Some(5.0), None],
    ),
  ])
  .unwrap()
}

fn metadata(resource: ResourceType) -> Metadata {
  Metadata {
    readable_period: "January 2024".into(),
    period:          Some(january()),
    resource:        Some(resource),
  }
}

fn repo_with(registry: AnalysisRegistry) -> DataRepository {
  let mut repo = DataRepository::new(settings(), registry);
  repo
    .register_source(source(ResourceType::cpu()), frame("cpu"), metadata(ResourceType::cpu()))
    .unwrap();
  repo
    .register_source(
      source(ResourceType::gpu()),
      frame("nvidia_com_gpu"),
      metadata(ResourceType::gpu()),
    )
    .unwrap();
  repo
}

fn analysis(on: impl Into<Identifier>, name: &str) -> Identifier {
  AnalysisIdentifier::new(on, name).into()
}

/// Registers `columns` (number of columns of the source) and `total`
/// (the sum of every cell), counting invocations of `columns`.
fn counting_registry(calls: Rc<Cell<usize>>) -> AnalysisRegistry {
  let mut registry = AnalysisRegistry::new();
  registry
    .register(IdentifierKind::Source, "columns", move |block, _| {
      calls.set(calls.get() + 1);
      Ok(Payload::Scalar(block.frame()?.columns.len() as f64))
    })
    .register(IdentifierKind::Source, "total", |block, _| {
      let total = block.frame()?.columns.iter().map(|c| c.total()).sum();
      Ok(Payload::Scalar(total))
    });
  registry
}

// ─── Sources ─────────────────────────────────────────────────────────────────

#[test]
fn register_source_rejects_duplicates() {
  let mut repo = repo_with(AnalysisRegistry::new());
  let err = repo
    .register_source(source(ResourceType::cpu()), frame("cpu"), metadata(ResourceType::cpu()))
    .unwrap_err();
  assert!(matches!(err, Error::Duplicate(_)));
  assert_eq!(repo.len(), 2);
}

#[test]
fn unregistered_source_is_not_found() {
  let mut repo = repo_with(AnalysisRegistry::new());
  let missing = SourceIdentifier::new(Period::new(0, 1), ResourceType::cpu());
  let err = repo.get_data(&missing.into()).unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn source_data_is_returned_as_registered() {
  let mut repo = repo_with(AnalysisRegistry::new());
  let payload = repo.get_data(&source(ResourceType::cpu()).into()).unwrap();
  assert_eq!(payload.as_frame().unwrap(), &frame("cpu"));
}

// ─── Memoization ─────────────────────────────────────────────────────────────

#[test]
fn analysis_runs_once_and_is_cached() {
  let calls = Rc::new(Cell::new(0));
  let mut repo = repo_with(counting_registry(calls.clone()));
  let id = analysis(source(ResourceType::cpu()), "columns");

  let first = repo.get_data(&id).unwrap();
  let second = repo.get_data(&id).unwrap();

  assert_eq!(calls.get(), 1);
  assert!(Rc::ptr_eq(&first, &second));
  assert_eq!(first.as_scalar(), Some(2.0));
}

#[test]
fn structurally_equal_identifiers_share_an_entry() {
  let calls = Rc::new(Cell::new(0));
  let mut repo = repo_with(counting_registry(calls.clone()));

  repo.get_data(&analysis(source(ResourceType::cpu()), "columns")).unwrap();
  repo.get_data(&analysis(source(ResourceType::cpu()), "columns")).unwrap();
  repo.get_data(&analysis(source(ResourceType::gpu()), "columns")).unwrap();

  assert_eq!(calls.get(), 2);
}

#[test]
fn analyses_inherit_source_metadata() {
  let mut repo = repo_with(counting_registry(Rc::new(Cell::new(0))));
  let id = analysis(source(ResourceType::gpu()), "total");

  assert!(matches!(repo.get_metadata(&id), Err(Error::NotFound(_))));
  repo.get_data(&id).unwrap();

  let meta = repo.get_metadata(&id).unwrap();
  assert_eq!(meta, &metadata(ResourceType::gpu()));
}

// ─── Dependencies ────────────────────────────────────────────────────────────

#[test]
fn dependencies_resolve_depth_first_and_are_cached() {
  let calls = Rc::new(Cell::new(0));
  let mut registry = counting_registry(calls.clone());
  registry.register(IdentifierKind::Source, "cross", |block, ctx| {
    let gpu = block.source()?.sibling(ResourceType::gpu());
    let own = ctx.get_scalar(&analysis(block.id.clone(), "columns"))?;
    let other = ctx.get_scalar(&analysis(gpu, "total"))?;
    Ok(Payload::Scalar(own + other))
  });
  let mut repo = repo_with(registry);

  let id = analysis(source(ResourceType::cpu()), "cross");
  let payload = repo.get_data(&id).unwrap();
  assert_eq!(payload.as_scalar(), Some(2.0 + 8.0));

  let order: Vec<String> = repo
    .filter_ids(filter::of_kind(IdentifierKind::Analysis))
    .iter()
    .map(ToString::to_string)
    .collect();
  assert_eq!(order, [
    format!("columns({})", source(ResourceType::cpu())),
    format!("total({})", source(ResourceType::gpu())),
    format!("cross({})", source(ResourceType::cpu())),
  ]);

  // Dependency was cached while resolving `cross`.
  repo.get_data(&analysis(source(ResourceType::cpu()), "columns")).unwrap();
  assert_eq!(calls.get(), 1);
}

#[test]
fn nested_analysis_runs_on_its_parent_result() {
  let mut registry = counting_registry(Rc::new(Cell::new(0)));
  registry.register(IdentifierKind::Analysis, "double", |block, _| {
    let value = expect_scalar(&block.id, &block.data)?;
    Ok(Payload::Scalar(value * 2.0))
  });
  let mut repo = repo_with(registry);

  let inner = AnalysisIdentifier::new(source(ResourceType::cpu()), "total");
  let outer = analysis(inner.clone(), "double");
  assert_eq!(repo.get_data(&outer).unwrap().as_scalar(), Some(16.0));
  assert!(repo.contains(&inner.into()));
}

#[test]
fn unknown_analysis_name() {
  let mut repo = repo_with(AnalysisRegistry::new());
  let err = repo
    .get_data(&analysis(source(ResourceType::cpu()), "nope"))
    .unwrap_err();
  assert!(matches!(err, Error::NoAnalysis {
    kind: IdentifierKind::Source,
    ..
  }));
}

#[test]
fn analysis_registered_for_another_kind_is_not_used() {
  let mut repo = repo_with(counting_registry(Rc::new(Cell::new(0))));
  let summary = SummaryIdentifier::new(january());
  let err = repo.get_data(&analysis(summary, "total")).unwrap_err();
  assert!(matches!(err, Error::NoAnalysis {
    kind: IdentifierKind::Summary,
    ..
  }));
}

#[test]
fn wrong_payload_shape_is_reported() {
  let mut registry = counting_registry(Rc::new(Cell::new(0)));
  registry.register(IdentifierKind::Analysis, "columns", |block, _| {
    Ok(Payload::Scalar(block.frame()?.columns.len() as f64))
  });
  let mut repo = repo_with(registry);

  let inner = analysis(source(ResourceType::cpu()), "total");
  let err = repo.get_data(&analysis(inner, "columns")).unwrap_err();
  assert!(matches!(err, Error::UnexpectedPayload {
    expected: "frame",
    found: "scalar",
    ..
  }));
}

// ─── Failure modes ───────────────────────────────────────────────────────────

#[test]
fn self_request_is_a_cycle() {
  let mut registry = AnalysisRegistry::new();
  registry.register(IdentifierKind::Source, "loop", |block, ctx| {
    let me = analysis(block.id.clone(), "loop");
    ctx.get_data(&me).map(|p| (*p).clone())
  });
  let mut repo = repo_with(registry);

  let id = analysis(source(ResourceType::cpu()), "loop");
  let err = repo.get_data(&id).unwrap_err();
  let Error::Cycle(chain) = err else {
    panic!("expected Cycle")
  };
  assert_eq!(chain, format!("{id} -> {id}"));
  assert!(!repo.contains(&id));
}

#[test]
fn unbounded_growth_hits_the_depth_limit() {
  let mut registry = AnalysisRegistry::new();
  for kind in [IdentifierKind::Source, IdentifierKind::Analysis] {
    registry
      .register(kind, "pad", |_, _| Ok(Payload::Scalar(0.0)))
      .register(kind, "grow", |block, ctx| {
        let next = analysis(analysis(block.id.clone(), "pad"), "grow");
        ctx.get_data(&next).map(|p| (*p).clone())
      });
  }
  let mut repo = repo_with(registry);

  let err = repo
    .get_data(&analysis(source(ResourceType::cpu()), "grow"))
    .unwrap_err();
  assert!(matches!(err, Error::DepthExceeded { depth: 8, .. }));
  assert!(repo.filter_ids(filter::analysis_named("grow")).is_empty());
}

#[test]
fn failed_resolution_leaves_no_entry_and_can_retry() {
  let calls = Rc::new(Cell::new(0));
  let counter = calls.clone();
  let mut registry = AnalysisRegistry::new();
  registry.register(IdentifierKind::Source, "flaky", move |block, ctx| {
    counter.set(counter.get() + 1);
    let missing = SourceIdentifier::new(Period::new(0, 1), ResourceType::gpu());
    ctx.get_data(&missing.into())?;
    Ok(Payload::Scalar(block.frame()?.time.len() as f64))
  });
  let mut repo = repo_with(registry);
  let id = analysis(source(ResourceType::cpu()), "flaky");

  assert!(matches!(repo.get_data(&id), Err(Error::NotFound(_))));
  assert!(!repo.contains(&id));
  assert!(repo.get_data(&id).is_err());
  assert_eq!(calls.get(), 2);
}

// ─── Summaries ───────────────────────────────────────────────────────────────

#[test]
fn summary_lists_configured_resource_types() {
  let mut repo = repo_with(AnalysisRegistry::new());
  let summary: Identifier = SummaryIdentifier::new(january()).into();

  let payload = repo.get_data(&summary).unwrap();
  assert_eq!(payload.as_list().unwrap(), ["cpu", "gpu"]);
  assert_eq!(repo.get_metadata(&summary).unwrap().resource, None);

  let empty: Identifier = SummaryIdentifier::new(Period::new(0, 1)).into();
  assert!(matches!(repo.get_data(&empty), Err(Error::NotFound(_))));
}

#[test]
fn summary_does_not_depend_on_registration_order() {
  let mut repo = DataRepository::new(settings(), AnalysisRegistry::new());
  repo
    .register_source(source(ResourceType::cpu()), frame("cpu"), metadata(ResourceType::cpu()))
    .unwrap();
  let summary: Identifier = SummaryIdentifier::new(january()).into();

  let early = repo.get_data(&summary).unwrap();
  assert_eq!(early.as_list().unwrap(), ["cpu", "gpu"]);

  repo
    .register_source(
      source(ResourceType::gpu()),
      frame("nvidia_com_gpu"),
      metadata(ResourceType::gpu()),
    )
    .unwrap();
  assert!(Rc::ptr_eq(&early, &repo.get_data(&summary).unwrap()));
}

#[test]
fn meta_analysis_combines_per_type_results() {
  let mut registry = counting_registry(Rc::new(Cell::new(0)));
  registry.register(IdentifierKind::Summary, "grandtotal", |block, ctx| {
    let period = block.period.expect("summary blocks carry a period");
    let mut sum = 0.0;
    for resource in [ResourceType::cpu(), ResourceType::gpu()] {
      let id = analysis(SourceIdentifier::new(period, resource), "total");
      sum += ctx.get_scalar(&id)?;
    }
    Ok(Payload::Scalar(sum))
  });
  let mut repo = repo_with(registry);

  let id = AnalysisIdentifier::new(SummaryIdentifier::new(january()), "grandtotal");
  assert!(id.is_meta());
  assert_eq!(repo.get_data(&id.clone().into()).unwrap().as_scalar(), Some(16.0));
  assert_eq!(
    repo.get_metadata(&id.into()).unwrap().readable_period,
    "January 2024"
  );
}

// ─── Enumeration ─────────────────────────────────────────────────────────────

#[test]
fn filter_ids_never_computes() {
  let calls = Rc::new(Cell::new(0));
  let repo = repo_with(counting_registry(calls.clone()));

  let sources = repo.filter_ids(filter::of_kind(IdentifierKind::Source));
  assert_eq!(sources.len(), 2);
  assert!(repo.filter_ids(filter::of_kind(IdentifierKind::Analysis)).is_empty());
  assert_eq!(
    repo.filter_ids(filter::source_of_type(ResourceType::gpu())),
    [Identifier::from(source(ResourceType::gpu()))]
  );
  assert_eq!(calls.get(), 0);
}

// ─── Ingestion ───────────────────────────────────────────────────────────────

#[test]
fn ingest_classifies_and_normalizes() {
  let mut repo = DataRepository::new(settings(), AnalysisRegistry::new());
  let jan_5 = JAN_1 + 4 * 86_400;
  let table = tide_labels::decode_frame(vec![jan_5, JAN_31_END], [(
    r#"{namespace="a", resource="nvidia_com_gpu"}"#,
    vec![Some(1.0), Some(1.0)],
  )])
  .unwrap();

  let ingested = repo.ingest(table.clone()).unwrap();
  assert_eq!(ingested.id, source(ResourceType::gpu()));
  assert_eq!(ingested.warnings, vec![PeriodWarning::StartSnapped {
    from: jan_5,
    to:   JAN_1,
  }]);

  let meta = repo.get_metadata(&ingested.id.clone().into()).unwrap();
  assert_eq!(meta.readable_period, "January 2024");
  assert_eq!(meta.resource, Some(ResourceType::gpu()));

  assert!(matches!(repo.ingest(table), Err(Error::Duplicate(_))));
}

#[test]
fn ingest_rejects_mixed_resources() {
  let mut repo = DataRepository::new(settings(), AnalysisRegistry::new());
  let table = tide_labels::decode_frame(vec![JAN_1], [
    (r#"{resource="cpu"}"#, vec![Some(1.0)]),
    (r#"{resource="nvidia_com_gpu"}"#, vec![Some(1.0)]),
  ])
  .unwrap();
  assert!(matches!(
    repo.ingest(table),
    Err(Error::Labels(tide_labels::Error::InconsistentResource(_)))
  ));
  assert!(repo.is_empty());
}

#[test]
fn ingest_rejects_empty_time_index() {
  let mut repo = DataRepository::new(settings(), AnalysisRegistry::new());
  let table = tide_labels::decode_frame(Vec::new(), [(
    r#"{resource="cpu"}"#,
    Vec::new(),
  )])
  .unwrap();
  assert!(matches!(
    repo.ingest(table),
    Err(Error::Core(tide_core::Error::EmptyRange))
  ));
}
