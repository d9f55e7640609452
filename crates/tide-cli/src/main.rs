//! `tide` binary.
//!
//! Reads `tide.toml` (or the path given with `--config`), ingests every
//! `--input` table, resolves the configured analyses and prints the results
//! as JSON on stdout.
//!
//! ```text
//! tide --input cpu.json --input gpu.json --pretty
//! ```

mod input;
mod report;

use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tide_core::settings::Settings;
use tide_repo::DataRepository;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{input::InputTable, report::Report};

#[derive(Parser)]
#[command(author, version, about = "Tide usage analytics")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tide.toml")]
  config: PathBuf,

  /// JSON input table; repeat for each resource type and period.
  #[arg(short, long = "input", required = true)]
  inputs: Vec<PathBuf>,

  /// Pretty-print the result document.
  #[arg(long)]
  pretty: bool,
}

fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays valid JSON.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TIDE").try_parsing(true))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise Settings")?;

  let registry = tide_analysis::default_registry(&settings);
  let mut repo = DataRepository::new(settings, registry);

  let mut ingested = Vec::with_capacity(cli.inputs.len());
  for path in &cli.inputs {
    let raw = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    let table: InputTable = serde_json::from_str(&raw)
      .with_context(|| format!("failed to parse {}", path.display()))?;
    let frame = table
      .into_frame()
      .with_context(|| format!("failed to decode {}", path.display()))?;
    let source = repo
      .ingest(frame)
      .with_context(|| format!("failed to ingest {}", path.display()))?;
    ingested.push(source);
  }

  let resolved =
    tide_analysis::run_planned(&mut repo).context("analysis run failed")?;
  tracing::info!(results = resolved.len(), entries = repo.len(), "run complete");

  let report = Report::collect(&mut repo, &ingested, &resolved)?;
  let json = if cli.pretty {
    serde_json::to_string_pretty(&report)?
  } else {
    serde_json::to_string(&report)?
  };
  println!("{json}");

  Ok(())
}
