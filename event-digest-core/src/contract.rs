//! # contract: event records and the remote store interface
//!
//! Plain data types shared by every pipeline step, plus the [`EventStore`]
//! trait that abstracts the remote object API.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate deterministic
//!   mocks (`MockEventStore`) for unit/integration tests.
//! - The mock is exported whenever the `test-export-mocks` feature is on (the default).

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DigestResult;

/// Opaque identifier assigned by the remote store when an event is created.
pub type EventId = String;

/// Bucket used for events that carry no category.
pub const DEFAULT_CATEGORY: &str = "OTHER";

/// Location shown for events that carry none.
pub const DEFAULT_LOCATION: &str = "TBA";

/// A single schedulable entertainment occurrence.
///
/// `name` and `datetime` are required when parsing; a missing `category`
/// lands in the [`DEFAULT_CATEGORY`] bucket. Fields this type does not name
/// are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub datetime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        datetime: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            datetime: datetime.into(),
            location: None,
            extra: Map::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Uppercased category used as the grouping key; blank categories map to
    /// [`DEFAULT_CATEGORY`].
    pub fn category_key(&self) -> String {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            self.category.to_uppercase()
        }
    }

    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }
}

/// Where the generate pipeline should source its events from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDecision {
    /// Fetch each recorded id from the remote store, in order.
    UseRemote(Vec<EventId>),
    /// Read the local event file.
    UseLocal,
}

/// A single item (event name or remote id) that failed without aborting its loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub item: String,
    pub reason: String,
}

/// Per-item progress reported while a pipeline runs, before the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemProgress<'a> {
    /// An event is about to be sent to the store.
    Publishing { name: &'a str },
    /// The store accepted an event and assigned `id`.
    Created { name: &'a str, id: &'a str },
    /// The store refused an event, or could not be reached.
    PublishFailed(&'a ItemFailure),
    /// A recorded id was read back from the store.
    Fetched { id: &'a str, name: &'a str },
    /// A recorded id could not be read back and is skipped.
    Skipped(&'a ItemFailure),
}

/// Trait for the remote object store holding published events.
///
/// Implementors map every failure to [`crate::error::DigestError::RemoteWrite`]
/// (create) or [`crate::error::DigestError::RemoteRead`] (fetch); callers treat
/// both as per-item outcomes.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Store the event inside a `{"data": event}` envelope and return the assigned id.
    async fn create(&self, event: &Event) -> DigestResult<EventId>;

    /// Read back the event payload stored under `id`.
    async fn fetch(&self, id: &str) -> DigestResult<Event>;
}
