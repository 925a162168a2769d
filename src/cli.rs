///
/// This module implements the CLI interface for event-digest: command parsing,
/// configuration loading and user-visible progress output.
///
/// All pipeline logic (resolving, loading, grouping, rendering) lives in the
/// [`event-digest-core`] crate. This module is strictly CLI glue.
///
/// ## Commands
/// - `publish`: send local events to the remote store and record the returned ids.
/// - `generate`: build `schedule.html` and `summary.md` from recorded ids or local events.
///
/// Both commands run with built-in defaults; `--config` points at an optional YAML file.
///
/// [`event-digest-core`]: ../../event-digest-core/
use crate::load_config::load_config;
use crate::store::RestObjectStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use event_digest_core::contract::ItemProgress;
use event_digest_core::pipeline::{generate, publish, SourceKind};
use event_digest_core::style::StyleTable;
use event_digest_core::transform::local_today;
use std::path::PathBuf;

/// CLI for event-digest: publish events and render schedules.
#[derive(Parser)]
#[clap(
    name = "event-digest",
    version,
    about = "Publish entertainment events to a remote store and render an HTML schedule and Markdown summary"
)]
pub struct Cli {
    /// Optional YAML config file overriding default paths and store settings
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Post every local event to the remote store and save the created ids
    Publish,
    /// Render the HTML schedule and Markdown summary
    Generate,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let config = load_config(cli.config.as_deref())?;
    let store = RestObjectStore::new(&config.store)?;

    match cli.command {
        Commands::Publish => {
            tracing::info!(command = "publish", "Starting publish");
            println!("Publishing events from {}", config.paths.events.display());
            let report = publish(&config.paths, &store, print_progress)
                .await
                .map_err(|e| {
                    tracing::error!(command = "publish", error = %e, "Publish failed");
                    anyhow::Error::new(e)
                })?;

            println!("All events processed");
            println!(
                "{} ids saved in {}",
                report.created.len(),
                report.id_list.display()
            );
            Ok(())
        }
        Commands::Generate => {
            tracing::info!(command = "generate", "Starting generate");
            let styles = StyleTable::default();
            let report = generate(
                &config.paths,
                &store,
                &styles,
                local_today(),
                print_progress,
            )
            .await
            .map_err(|e| {
                tracing::error!(command = "generate", error = %e, "Generate failed");
                anyhow::Error::new(e)
            })?;

            let source = match report.source {
                SourceKind::Remote => "remote store",
                SourceKind::Local => "local events file",
            };
            println!("Loaded {} events from {source}", report.loaded);
            for (category, count) in &report.categories {
                println!("  {category}: {count}");
            }
            println!("Today's events: {}", report.today);
            println!("Results written to {}", config.paths.output_dir.display());
            Ok(())
        }
    }
}

/// Prints one stdout line per item as the pipeline reaches it.
fn print_progress(progress: ItemProgress<'_>) {
    match progress {
        ItemProgress::Publishing { name } => println!("Publishing event: {name}"),
        ItemProgress::Created { id, .. } => println!("Created with id: {id}"),
        ItemProgress::PublishFailed(failure) => {
            println!("Failed to publish {}: {}", failure.item, failure.reason)
        }
        ItemProgress::Fetched { .. } => {}
        ItemProgress::Skipped(failure) => {
            println!("Skipped id {}: {}", failure.item, failure.reason)
        }
    }
}
