//! In-process fake of the remote objects API, served with tiny_http.
//!
//! - `POST /objects` stores `data` and answers `{"id": "obj-N", "data": ...}`;
//!   events named `reject-me` get a 400.
//! - `GET /objects/{id}` answers `{"id", "data"}` or 404.
//! - `GET /objects/slow` waits two seconds before answering.
//! - `GET /objects/nodata` answers an object without a `data` field.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tiny_http::{Method, Response, Server, StatusCode};

pub struct FakeObjectApi {
    pub base_url: String,
    objects: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeObjectApi {
    pub fn start() -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind fake object api");
        let addr = server.server_addr().to_ip().expect("tcp listener address");
        let objects: Arc<Mutex<Vec<(String, Value)>>> = Arc::new(Mutex::new(Vec::new()));

        let store = objects.clone();
        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let (status, payload) = handle(&store, request.method(), request.url(), &body);
                let response = Response::from_string(payload.to_string())
                    .with_status_code(StatusCode(status));
                let _ = request.respond(response);
            }
        });

        FakeObjectApi {
            base_url: format!("http://{addr}"),
            objects,
        }
    }

    /// Stored `data` payloads, in creation order.
    pub fn stored(&self) -> Vec<Value> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(_, data)| data.clone())
            .collect()
    }

    pub fn insert(&self, id: &str, data: Value) {
        self.objects.lock().unwrap().push((id.to_string(), data));
    }
}

fn handle(
    objects: &Arc<Mutex<Vec<(String, Value)>>>,
    method: &Method,
    url: &str,
    body: &str,
) -> (u16, Value) {
    match (method, url.strip_prefix("/objects")) {
        (Method::Post, Some("")) => {
            let envelope: Value = serde_json::from_str(body).unwrap_or(Value::Null);
            let data = envelope.get("data").cloned().unwrap_or(Value::Null);
            if data.get("name") == Some(&json!("reject-me")) {
                return (400, json!({ "error": "bad request" }));
            }
            let mut objects = objects.lock().unwrap();
            let id = format!("obj-{}", objects.len() + 1);
            objects.push((id.clone(), data.clone()));
            (200, json!({ "id": id, "name": null, "data": data }))
        }
        (Method::Get, Some("/slow")) => {
            thread::sleep(Duration::from_secs(2));
            (200, json!({ "id": "slow", "data": { "name": "late", "datetime": "2024-01-01" } }))
        }
        (Method::Get, Some("/nodata")) => (200, json!({ "id": "nodata", "name": "bare" })),
        (Method::Get, Some(rest)) => {
            let id = rest.trim_start_matches('/');
            let objects = objects.lock().unwrap();
            match objects.iter().find(|(key, _)| key == id) {
                Some((key, data)) => (200, json!({ "id": key, "data": data })),
                None => (404, json!({ "error": format!("Object with id={id} was not found.") })),
            }
        }
        _ => (405, json!({ "error": "method not allowed" })),
    }
}

/// Base URL of a port with nothing listening on it.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}
