//! Id-list artifact handling and the event source resolver.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::contract::{EventId, SourceDecision};
use crate::error::{DigestError, DigestResult};
use crate::render::write_output;

/// Reads the id-list artifact written by the publish pipeline.
///
/// Returns [`DigestError::MissingArtifact`] when the file does not exist.
pub fn read_id_list(path: &Path) -> DigestResult<Vec<EventId>> {
    if !path.exists() {
        return Err(DigestError::MissingArtifact(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| DigestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DigestError::MalformedSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrites the id-list artifact with `ids`, creating its parent directory if needed.
pub fn write_id_list(path: &Path, ids: &[EventId]) -> DigestResult<()> {
    let json = serde_json::to_string_pretty(ids)?;
    write_output(path, &json)?;
    debug!(path = %path.display(), count = ids.len(), "Wrote id list");
    Ok(())
}

/// Decides whether events come from recorded remote ids or the local event file.
///
/// Never fails: a missing, unreadable, malformed or empty id list all fall back
/// to [`SourceDecision::UseLocal`].
pub fn resolve(id_list_path: &Path) -> SourceDecision {
    match read_id_list(id_list_path) {
        Ok(ids) if ids.is_empty() => {
            warn!(path = %id_list_path.display(), "Id list is empty, using local events");
            SourceDecision::UseLocal
        }
        Ok(ids) => {
            info!(path = %id_list_path.display(), count = ids.len(), "Using recorded remote ids");
            SourceDecision::UseRemote(ids)
        }
        Err(DigestError::MissingArtifact(_)) => {
            warn!(path = %id_list_path.display(), "No id list found, using local events");
            SourceDecision::UseLocal
        }
        Err(e) => {
            warn!(path = %id_list_path.display(), error = %e, "Unable to read id list, falling back to local events");
            SourceDecision::UseLocal
        }
    }
}
