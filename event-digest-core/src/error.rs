//! Error types for the event pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing or generating digests.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("remote store rejected create ({}): {body}", describe_status(.status))]
    RemoteWrite { status: Option<u16>, body: String },

    #[error("remote read failed for id {id}: {reason}")]
    RemoteRead { id: String, reason: String },

    #[error("malformed event source {}: {source}", .path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Not a failure on its own: signals the resolver to fall back to local events.
    #[error("artifact not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no response".to_string(),
    }
}

/// Result type alias for pipeline operations.
pub type DigestResult<T> = Result<T, DigestError>;
