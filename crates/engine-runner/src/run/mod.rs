use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetsmith_domain::{Schema, SheetValue};
use sheetsmith_engine::{load_dotenv_from, EngineConfig, FormSession};

mod report;

/// Used when `RUST_LOG` is unset. The binary crate is `sheetsmith`, so its
/// own events are under that target.
const DEFAULT_LOG_FILTER: &str = "sheetsmith=info,sheetsmith_engine=debug";

pub fn run() -> Result<()> {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    load_dotenv_from(&repo_root);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting SheetSmith");

    let config = EngineConfig::from_env();
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let schema_path = args
        .next()
        .or_else(|| config.schema_path.clone())
        .context("No template given: pass SCHEMA_PATH or set SHEETSMITH_SCHEMA_PATH")?;
    let sheet_path = args.next().or_else(|| config.sheet_path.clone());

    let schema = read_schema(&schema_path)?;
    tracing::info!(
        path = %schema_path.display(),
        fields = schema.len(),
        "Loaded template"
    );

    let session = match &sheet_path {
        Some(path) => FormSession::load(schema, &read_sheet(path)?, &config),
        None => FormSession::new(schema, &config),
    };

    let report = report::build(&session);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_schema(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    Schema::from_json(&text).with_context(|| format!("Invalid template {}", path.display()))
}

fn read_sheet(path: &Path) -> Result<SheetValue> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sheet {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Sheet {} is not valid JSON", path.display()))?;
    Ok(SheetValue::from(json))
}
