//! The merge pipeline: catalog ingest, registry enrichment, description
//! synthesis, export. One strictly sequential pass per run; the whole
//! store lives in memory for the run's duration.

pub mod combine;
pub mod describe;
pub mod enrich;
pub mod export;
pub mod ingest;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::Result;
use crate::store::RecordStore;
use crate::tabular::Table;

/// Per-row enrichment failure retained for the run report.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// Key of the record the registry row addressed
    pub key: String,
    /// Raw `|`-delimited identifier value list
    pub identifiers: String,
    /// Raw `|`-delimited identifier type list
    pub identifier_types: String,
    pub reason: String,
}

/// Result of a complete merge run.
#[derive(Debug, Serialize)]
pub struct MergeOutcome {
    pub catalog_rows: usize,
    pub records: usize,
    pub registry_rows: usize,
    pub enriched_records: usize,
    pub exported_records: usize,
    pub row_errors: Vec<RowError>,
    pub output_file: String,
    pub finished_at: DateTime<Utc>,
}

/// Run the full merge. Row-level faults are collected into the outcome
/// rather than aborting the batch; only environment failures (unreadable
/// inputs, unwritable output) are fatal.
#[instrument(skip(config))]
pub fn run(config: &Config) -> Result<MergeOutcome> {
    info!("Reading catalog export from {}", config.inputs.catalog.display());
    let catalog = Table::read(&config.inputs.catalog)?;

    let mut store = RecordStore::new();
    let catalog_rows = ingest::ingest_catalog(&mut store, &catalog, &config.entity.url_template);
    info!("Stored {} records from {} catalog rows", store.len(), catalog_rows);

    info!("Reading registry export from {}", config.inputs.registry.display());
    let registry = Table::read(&config.inputs.registry)?;

    let enrichment = enrich::enrich_from_registry(&mut store, &registry);
    info!(
        "Enriched {} of {} records from {} registry rows",
        enrichment.enriched,
        store.len(),
        enrichment.registry_rows
    );
    for error in &enrichment.row_errors {
        warn!(
            key = %error.key,
            "misaligned identifier lists: '{}' / '{}'",
            error.identifiers,
            error.identifier_types
        );
    }

    describe::synthesize_descriptions(&mut store);
    info!("Descriptions synthesized");

    let exported_records = export::export_store(&store, &config.output.path)?;
    info!("Wrote {} records to {}", exported_records, config.output.path.display());

    Ok(MergeOutcome {
        catalog_rows,
        records: store.len(),
        registry_rows: enrichment.registry_rows,
        enriched_records: enrichment.enriched,
        exported_records,
        row_errors: enrichment.row_errors,
        output_file: config.output.path.display().to_string(),
        finished_at: Utc::now(),
    })
}

/// Serialize the outcome to a timestamped JSON report under `report_dir`.
/// Returns the report path.
pub fn persist_report(outcome: &MergeOutcome, report_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(report_dir)?;

    let filename = format!(
        "merge_report_{}.json",
        outcome.finished_at.format("%Y%m%d_%H%M%S")
    );
    let path = report_dir.join(filename);

    let json_content = serde_json::to_string_pretty(outcome)?;
    fs::write(&path, json_content)?;

    Ok(path)
}
