//! Loads events either from the remote store or from the local event file.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::contract::{Event, EventStore, ItemFailure, ItemProgress, SourceDecision};
use crate::error::{DigestError, DigestResult};

/// Events that loaded successfully plus the ids that were skipped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub events: Vec<Event>,
    pub failures: Vec<ItemFailure>,
}

/// Reads the local event file (a JSON array of events).
///
/// Any structural problem, including a missing required field in one record,
/// fails the whole read with [`DigestError::MalformedSource`].
pub fn read_local_events(path: &Path) -> DigestResult<Vec<Event>> {
    debug!(path = %path.display(), "Reading local events");
    let raw = fs::read_to_string(path).map_err(|source| {
        error!(error = ?source, path = %path.display(), "Failed to read local event file");
        DigestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let events: Vec<Event> = serde_json::from_str(&raw).map_err(|source| {
        error!(error = %source, path = %path.display(), "Local event file is malformed");
        DigestError::MalformedSource {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), count = events.len(), "Loaded local events");
    Ok(events)
}

/// Loads events according to `decision`.
///
/// Remote fetch failures are recorded per id and skipped; the returned events
/// keep the relative order of the ids that succeeded. `on_item` sees each
/// remote id's outcome as soon as it is known.
pub async fn load<S, F>(
    decision: &SourceDecision,
    store: &S,
    local_events: &Path,
    mut on_item: F,
) -> DigestResult<LoadOutcome>
where
    S: EventStore + ?Sized,
    F: FnMut(ItemProgress<'_>),
{
    let ids = match decision {
        SourceDecision::UseLocal => {
            let events = read_local_events(local_events)?;
            return Ok(LoadOutcome {
                events,
                failures: Vec::new(),
            });
        }
        SourceDecision::UseRemote(ids) => ids,
    };

    let mut outcome = LoadOutcome::default();
    for id in ids {
        match store.fetch(id).await {
            Ok(event) => {
                debug!(id = %id, name = %event.name, "Fetched event");
                on_item(ItemProgress::Fetched {
                    id,
                    name: &event.name,
                });
                outcome.events.push(event);
            }
            Err(e) => {
                error!(id = %id, error = %e, "Skipping id after failed fetch");
                let failure = ItemFailure {
                    item: id.clone(),
                    reason: e.to_string(),
                };
                on_item(ItemProgress::Skipped(&failure));
                outcome.failures.push(failure);
            }
        }
    }
    info!(
        fetched = outcome.events.len(),
        skipped = outcome.failures.len(),
        "Loaded events from remote store"
    );
    Ok(outcome)
}
