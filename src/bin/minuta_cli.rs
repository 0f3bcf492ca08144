//! CLI for running the fusion pipeline on a JSON document bundle
//!
//! Reads a JSON array of `DocumentRecord`s, runs the mapping pipeline and
//! prints the fused aggregates, alerts and qualification prose. With
//! `--persist` the result is upserted into Postgres (`DATABASE_URL`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use uuid::Uuid;

use minuta_engine::database::UpsertService;
use minuta_engine::models::DocumentRecord;
use minuta_engine::orchestrator::run_mapping;
use minuta_engine::qualification::qualify_all;

#[derive(Parser)]
#[command(name = "minuta_cli", about = "Fuse document extractions into a minuta dataset")]
struct Cli {
    /// JSON file containing an array of document records.
    input: PathBuf,

    /// Upsert the mapped result into the database.
    #[arg(long)]
    persist: bool,

    /// Transaction id to persist under (defaults to a fresh id).
    #[arg(long)]
    transaction_id: Option<Uuid>,

    /// Print the raw mapped aggregates as JSON instead of prose.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let documents: Vec<DocumentRecord> =
        serde_json::from_str(&raw).context("Failed to parse document bundle")?;

    let mapped = run_mapping(&documents)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&mapped)?);
    } else {
        let prose = qualify_all(&mapped);
        for (label, texts) in [
            ("ALIENANTES", &prose.alienantes),
            ("ADQUIRENTES", &prose.adquirentes),
            ("ANUENTES", &prose.anuentes),
        ] {
            if texts.is_empty() {
                continue;
            }
            println!("{}", label.bold().underline());
            for text in texts {
                println!("  {text}");
            }
        }
        if !prose.property.is_empty() {
            println!("{}", "IMÓVEL".bold().underline());
            println!("  {}", prose.property);
        }
        if !prose.deal.is_empty() {
            println!("{}", "NEGÓCIO".bold().underline());
            println!("  {}", prose.deal);
        }
        for alert in &mapped.alerts {
            println!("{} {}", format!("[{:?}]", alert.severity).red().bold(), alert.message);
        }
        println!(
            "{}",
            format!(
                "{} documento(s), {} campo(s) preenchido(s), {} pendência(s)",
                mapped.metadata.documents_processed,
                mapped.metadata.fields_filled,
                mapped.metadata.missing_field_paths.len()
            )
            .dimmed()
        );
    }

    if cli.persist {
        persist(&mapped, cli.transaction_id.unwrap_or_else(Uuid::new_v4)).await?;
    }

    Ok(())
}

#[cfg(feature = "database")]
async fn persist(mapped: &minuta_engine::MappedFields, transaction_id: Uuid) -> Result<()> {
    use minuta_engine::config::Settings;
    use minuta_engine::database::PgRecordStore;

    let settings = Settings::from_env()?;
    let store = PgRecordStore::connect(&settings.database_url).await?;
    store.ensure_schema().await?;

    let service = UpsertService::new(store);
    let summary = service.persist_mapped_fields(mapped, transaction_id).await;
    println!(
        "persisted transaction {transaction_id}: {} inserted, {} updated, {} failed",
        summary.inserted, summary.updated, summary.failed
    );
    for error in &summary.errors {
        eprintln!("  {error}");
    }
    Ok(())
}

#[cfg(not(feature = "database"))]
async fn persist(mapped: &minuta_engine::MappedFields, transaction_id: Uuid) -> Result<()> {
    use minuta_engine::database::MemoryRecordStore;

    // Dry-run against the in-memory store when built without Postgres.
    let service = UpsertService::new(MemoryRecordStore::new());
    let summary = service.persist_mapped_fields(mapped, transaction_id).await;
    println!(
        "dry-run (no database feature): {} inserted, {} updated, {} failed",
        summary.inserted, summary.updated, summary.failed
    );
    Ok(())
}
