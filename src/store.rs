#![doc = "Remote object store integration: implements the core `EventStore` trait against a REST objects API."]
//
//! # Remote Store Integration (CLI <-> Core)
//!
//! [`RestObjectStore`] speaks the generic objects API used to persist events:
//!
//! - `POST <base>/objects` with `{"data": <event>}`, answered with `{"id": ...}` on 200/201
//! - `GET <base>/objects/{id}` with a bounded timeout, answered with `{"data": <event>}` on 200
//!
//! Every failure is mapped onto the core error taxonomy so the pipelines can
//! count and skip it per item. See [`event_digest_core::contract`] for the trait contract.

use async_trait::async_trait;
use event_digest_core::contract::{Event, EventId, EventStore};
use event_digest_core::error::{DigestError, DigestResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::load_config::StoreConfig;

#[derive(Serialize)]
struct ObjectEnvelope<'a> {
    data: &'a Event,
}

#[derive(Deserialize)]
struct CreatedObject {
    id: Option<Value>,
}

#[derive(Deserialize)]
struct FetchedObject {
    data: Option<Event>,
}

pub struct RestObjectStore {
    client: Client,
    base_url: String,
    fetch_timeout: Duration,
}

impl RestObjectStore {
    pub fn new(config: &StoreConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        tracing::info!(
            base_url = %config.base_url,
            fetch_timeout_secs = config.fetch_timeout.as_secs(),
            "Initialized RestObjectStore"
        );
        Ok(RestObjectStore {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_timeout: config.fetch_timeout,
        })
    }

    fn objects_url(&self) -> String {
        format!("{}/objects", self.base_url)
    }

    fn object_url(&self, id: &str) -> String {
        format!("{}/objects/{}", self.base_url, id)
    }
}

/// Ids are usually strings, but numeric ids are accepted and kept as text.
fn id_to_string(id: Value) -> Option<EventId> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl EventStore for RestObjectStore {
    async fn create(&self, event: &Event) -> DigestResult<EventId> {
        let url = self.objects_url();
        tracing::info!(url = %url, name = %event.name, "Creating remote object");

        let response = self
            .client
            .post(&url)
            .json(&ObjectEnvelope { data: event })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, name = %event.name, "Transport error creating object");
                DigestError::RemoteWrite {
                    status: e.status().map(|s| s.as_u16()),
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<Failed to decode response body>"));

        if status != StatusCode::OK && status != StatusCode::CREATED {
            tracing::error!(status = %status, name = %event.name, body = %body, "Remote store rejected create");
            return Err(DigestError::RemoteWrite {
                status: Some(status.as_u16()),
                body,
            });
        }

        let created: CreatedObject = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, body = %body, "Create response is not valid JSON");
            DigestError::RemoteWrite {
                status: Some(status.as_u16()),
                body: body.clone(),
            }
        })?;

        match created.id.and_then(id_to_string) {
            Some(id) => {
                tracing::info!(id = %id, name = %event.name, "Successfully created remote object");
                Ok(id)
            }
            None => {
                tracing::error!(body = %body, "Create response carries no id");
                Err(DigestError::RemoteWrite {
                    status: Some(status.as_u16()),
                    body: format!("response has no id: {body}"),
                })
            }
        }
    }

    async fn fetch(&self, id: &str) -> DigestResult<Event> {
        let url = self.object_url(id);
        tracing::debug!(url = %url, "Fetching remote object");

        let read_error = |reason: String| DigestError::RemoteRead {
            id: id.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| read_error(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(read_error(format!("status {status}: {body}")));
        }

        let object: FetchedObject = response
            .json()
            .await
            .map_err(|e| read_error(format!("invalid object payload: {e}")))?;

        let event = object
            .data
            .ok_or_else(|| read_error("response has no data field".to_string()))?;
        tracing::info!(id = %id, name = %event.name, "Fetched remote object");
        Ok(event)
    }
}
