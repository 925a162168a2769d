//! High-level pipelines: publish local events to the remote store, and generate digests.
//!
//! - [`publish`]: local events → [`EventStore::create`] per event → id-list artifact.
//! - [`generate`]: [`resolve`] → [`load`] → group/filter → HTML + Markdown outputs.
//!
//! # Error Handling
//! Per-item remote failures never abort a run; they are logged and collected in
//! the report. Failing to read or parse the local event file, or to write an
//! output, ends the run with the corresponding [`DigestError`].
//!
//! [`DigestError`]: crate::error::DigestError

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{error, info};

use crate::contract::{EventId, EventStore, ItemFailure, ItemProgress, SourceDecision};
use crate::error::DigestResult;
use crate::load::{load, read_local_events};
use crate::render::{render_html, render_markdown, write_output};
use crate::resolve::{resolve, write_id_list};
use crate::style::StyleTable;
use crate::transform::{filter_today, group_by_category};

pub const HTML_FILE_NAME: &str = "schedule.html";
pub const MARKDOWN_FILE_NAME: &str = "summary.md";

/// File locations shared by both pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPaths {
    /// Local event file (JSON array of events).
    pub events: PathBuf,
    /// Id-list artifact written by publish and read by generate.
    pub event_ids: PathBuf,
    /// Directory receiving the rendered HTML and Markdown documents.
    pub output_dir: PathBuf,
}

impl DigestPaths {
    pub fn html_output(&self) -> PathBuf {
        self.output_dir.join(HTML_FILE_NAME)
    }

    pub fn markdown_output(&self) -> PathBuf {
        self.output_dir.join(MARKDOWN_FILE_NAME)
    }
}

impl Default for DigestPaths {
    fn default() -> Self {
        Self {
            events: PathBuf::from("data/events.json"),
            event_ids: PathBuf::from("data/event_ids.json"),
            output_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug)]
pub struct PublishReport {
    /// Ids of created events, in input order.
    pub created: Vec<EventId>,
    /// Events (by name) the store refused or could not be reached for.
    pub failures: Vec<ItemFailure>,
    pub id_list: PathBuf,
}

/// Sends every local event to `store`, reporting each one through `on_item`
/// before and after its create call.
pub async fn publish<S, F>(
    paths: &DigestPaths,
    store: &S,
    mut on_item: F,
) -> DigestResult<PublishReport>
where
    S: EventStore + ?Sized,
    F: FnMut(ItemProgress<'_>),
{
    info!(events = %paths.events.display(), "[PUBLISH] Starting publish pipeline");
    let events = read_local_events(&paths.events)?;

    let mut created = Vec::with_capacity(events.len());
    let mut failures = Vec::new();
    for event in &events {
        info!(name = %event.name, "[PUBLISH] Sending event");
        on_item(ItemProgress::Publishing { name: &event.name });
        match store.create(event).await {
            Ok(id) => {
                info!(name = %event.name, id = %id, "[PUBLISH] Created");
                on_item(ItemProgress::Created {
                    name: &event.name,
                    id: &id,
                });
                created.push(id);
            }
            Err(e) => {
                error!(name = %event.name, error = %e, "[PUBLISH][ERROR] Create failed, continuing");
                let failure = ItemFailure {
                    item: event.name.clone(),
                    reason: e.to_string(),
                };
                on_item(ItemProgress::PublishFailed(&failure));
                failures.push(failure);
            }
        }
    }

    write_id_list(&paths.event_ids, &created)?;
    info!(
        created = created.len(),
        failed = failures.len(),
        path = %paths.event_ids.display(),
        "[PUBLISH] Saved id list"
    );

    Ok(PublishReport {
        created,
        failures,
        id_list: paths.event_ids.clone(),
    })
}

/// Which source the generate run ended up reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Local,
}

#[derive(Debug)]
pub struct GenerateReport {
    pub source: SourceKind,
    pub loaded: usize,
    /// Remote ids skipped after a failed fetch.
    pub failures: Vec<ItemFailure>,
    /// Category and event count, in rendering order.
    pub categories: Vec<(String, usize)>,
    pub today: usize,
    pub html_path: PathBuf,
    pub markdown_path: PathBuf,
}

/// Runs resolve → load → transform → render. `today` is fixed for the whole run.
pub async fn generate<S, F>(
    paths: &DigestPaths,
    store: &S,
    styles: &StyleTable,
    today: NaiveDate,
    on_item: F,
) -> DigestResult<GenerateReport>
where
    S: EventStore + ?Sized,
    F: FnMut(ItemProgress<'_>),
{
    info!(%today, "[GENERATE] Starting generate pipeline");

    let decision = resolve(&paths.event_ids);
    let source = match decision {
        SourceDecision::UseRemote(_) => SourceKind::Remote,
        SourceDecision::UseLocal => SourceKind::Local,
    };

    let outcome = load(&decision, store, &paths.events, on_item).await?;
    if outcome.events.is_empty() {
        info!("[GENERATE] No events loaded, rendering empty outputs");
    }

    let grouped = group_by_category(&outcome.events);
    let today_events = filter_today(&outcome.events, today);

    let html = render_html(&grouped, styles)?;
    let markdown = render_markdown(&grouped, &today_events, styles);

    let html_path = paths.html_output();
    let markdown_path = paths.markdown_output();
    write_output(&html_path, &html)?;
    write_output(&markdown_path, &markdown)?;

    let report = GenerateReport {
        source,
        loaded: outcome.events.len(),
        failures: outcome.failures,
        categories: grouped
            .iter()
            .map(|(category, events)| (category.to_string(), events.len()))
            .collect(),
        today: today_events.len(),
        html_path,
        markdown_path,
    };
    info!(
        source = ?report.source,
        loaded = report.loaded,
        skipped = report.failures.len(),
        today = report.today,
        "[GENERATE] Outputs generated"
    );
    Ok(report)
}
