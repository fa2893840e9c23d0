use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use agent_merger::config::Config;
use agent_merger::logging;
use agent_merger::pipeline;

#[derive(Parser)]
#[command(name = "agent_merger")]
#[command(about = "Merges collection and registry agent exports for Mix'n'Match import")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full merge: catalog ingest, registry enrichment, export
    Merge {
        /// Path to the catalog (collections API) agent export
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Path to the registry (collections management) parties export
        #[arg(long)]
        registry: Option<PathBuf>,
        /// Path of the combined output table
        #[arg(long)]
        output: Option<PathBuf>,
        /// Alternative config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            catalog,
            registry,
            output,
            config,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::load_or_default()?,
            };
            if let Some(path) = catalog {
                config.inputs.catalog = path;
            }
            if let Some(path) = registry {
                config.inputs.registry = path;
            }
            if let Some(path) = output {
                config.output.path = path;
            }

            println!("🔄 Merging agent exports...");
            match pipeline::run(&config) {
                Ok(outcome) => {
                    println!("\n📊 Merge results:");
                    println!("   Catalog rows: {}", outcome.catalog_rows);
                    println!("   Records stored: {}", outcome.records);
                    println!("   Registry rows: {}", outcome.registry_rows);
                    println!("   Records enriched: {}", outcome.enriched_records);
                    println!("   Records exported: {}", outcome.exported_records);
                    println!("   Output file: {}", outcome.output_file);

                    if !outcome.row_errors.is_empty() {
                        println!(
                            "\n⚠️  {} rows had misaligned identifier lists:",
                            outcome.row_errors.len()
                        );
                        for row_error in &outcome.row_errors {
                            println!(
                                "   - {}: '{}' / '{}'",
                                row_error.key, row_error.identifiers, row_error.identifier_types
                            );
                        }
                    }

                    let report = pipeline::persist_report(&outcome, &config.output.report_dir)?;
                    info!("Run report written to {}", report.display());
                    println!("✅ Merge completed");
                }
                Err(e) => {
                    error!("Merge failed: {}", e);
                    println!("❌ Merge failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
