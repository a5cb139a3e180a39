// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the chart API.

use crate::types::{Chart, ChartSpec};
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

const CHART_API_VERSION: &str = "helm.k0sproject.io/v1beta1";

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Decoded query pairs in request order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[derive(Default)]
struct MockState {
    /// Stored charts keyed by (namespace, name)
    charts: BTreeMap<(String, String), Value>,
    watch_events: Vec<Value>,
    /// Canned responses by request path, served ahead of the store
    raw_responses: BTreeMap<String, (u16, String)>,
    requests: Vec<RecordedRequest>,
    resource_version: u64,
}

impl MockState {
    fn next_resource_version(&mut self) -> String {
        self.resource_version += 1;
        self.resource_version.to_string()
    }
}

/// An in-memory chart API server behind a `tower::Service`.
#[derive(Clone, Default)]
pub struct MockService {
    state: Arc<Mutex<MockState>>,
}

/// Where a request path points within the chart API
enum Target {
    Collection { namespace: String },
    Object { namespace: String, name: String },
    Status { namespace: String, name: String },
}

fn parse_target(path: &str) -> Option<Target> {
    let rest = path.strip_prefix("/apis/helm.k0sproject.io/v1beta1/namespaces/")?;
    let segments: Vec<&str> = rest.split('/').collect();
    match segments.as_slice() {
        [ns, "charts"] => Some(Target::Collection {
            namespace: ns.to_string(),
        }),
        [ns, "charts", name] => Some(Target::Object {
            namespace: ns.to_string(),
            name: name.to_string(),
        }),
        [ns, "charts", name, "status"] => Some(Target::Status {
            namespace: ns.to_string(),
            name: name.to_string(),
        }),
        _ => None,
    }
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing chart
    pub fn with_chart(self, chart: &Chart) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let namespace = chart.metadata.namespace.clone().unwrap();
            let name = chart.metadata.name.clone().unwrap();
            let mut value = serde_json::to_value(chart).unwrap();
            value["metadata"]["resourceVersion"] = json!(state.next_resource_version());
            state.charts.insert((namespace, name), value);
        }
        self
    }

    /// Add an event to the stream served for watch requests
    pub fn with_watch_event(self, event_type: &str, chart: &Chart) -> Self {
        self.state.lock().unwrap().watch_events.push(json!({
            "type": event_type,
            "object": serde_json::to_value(chart).unwrap(),
        }));
        self
    }

    /// Add a server-side error event (a Status object) to the watch stream
    pub fn with_watch_error(self, code: u16, reason: &str, message: &str) -> Self {
        let status = status_json(code, reason, message.to_string());
        self.state.lock().unwrap().watch_events.push(json!({
            "type": "ERROR",
            "object": serde_json::from_str::<Value>(&status).unwrap(),
        }));
        self
    }

    /// Answer every request for `path` with `status` and `body` as given
    pub fn with_raw_response(self, path: &str, status: u16, body: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .raw_responses
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub fn stored_chart(&self, namespace: &str, name: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .charts
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    fn handle(&self, request: RecordedRequest) -> (u16, String) {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if let Some(response) = state.raw_responses.get(&request.path) {
            return response.clone();
        }

        let Some(target) = parse_target(&request.path) else {
            return (404, not_found_json("path", &request.path));
        };

        match (request.method.as_str(), target) {
            ("GET", Target::Collection { namespace }) => {
                if request.query_value("watch").as_deref() == Some("true") {
                    let lines: String = state
                        .watch_events
                        .iter()
                        .map(|e| format!("{}\n", e))
                        .collect();
                    return (200, lines);
                }
                let items: Vec<Value> = state
                    .charts
                    .iter()
                    .filter(|((ns, _), _)| *ns == namespace)
                    .map(|(_, v)| v.clone())
                    .collect();
                (200, chart_list_json(items, state.resource_version))
            }
            ("GET", Target::Object { namespace, name }) => match state.charts.get(&(namespace, name.clone())) {
                Some(chart) => (200, chart.to_string()),
                None => (404, not_found_json("charts.helm.k0sproject.io", &name)),
            },
            ("POST", Target::Collection { namespace }) => {
                let mut chart: Value = match serde_json::from_slice(&request.body) {
                    Ok(v) => v,
                    Err(e) => return (400, bad_request_json(&e.to_string())),
                };
                let Some(name) = chart["metadata"]["name"].as_str().map(str::to_string) else {
                    return (422, invalid_json("metadata.name: Required value"));
                };
                let key = (namespace.clone(), name.clone());
                if state.charts.contains_key(&key) {
                    return (409, already_exists_json(&name));
                }
                chart["metadata"]["namespace"] = json!(namespace);
                chart["metadata"]["uid"] = json!(format!("uid-{}", name));
                chart["metadata"]["resourceVersion"] = json!(state.next_resource_version());
                state.charts.insert(key, chart.clone());
                (201, chart.to_string())
            }
            ("PUT", Target::Status { namespace, name }) => {
                let update: Value = match serde_json::from_slice(&request.body) {
                    Ok(v) => v,
                    Err(e) => return (400, bad_request_json(&e.to_string())),
                };
                let resource_version = state.next_resource_version();
                match state.charts.get_mut(&(namespace, name.clone())) {
                    Some(chart) => {
                        chart["status"] = update["status"].clone();
                        chart["metadata"]["resourceVersion"] = json!(resource_version);
                        (200, chart.to_string())
                    }
                    None => (404, not_found_json("charts.helm.k0sproject.io", &name)),
                }
            }
            ("DELETE", Target::Object { namespace, name }) => {
                match state.charts.remove(&(namespace, name.clone())) {
                    Some(_) => (200, success_status_json(&name)),
                    None => (404, not_found_json("charts.helm.k0sproject.io", &name)),
                }
            }
            (method, _) => (405, method_not_allowed_json(method)),
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?.to_bytes();
            let recorded = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(str::to_string),
                body: body.to_vec(),
            };

            let (status, body) = service.handle(recorded);
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(bytes::Bytes::from(body)))
                .unwrap())
        })
    }
}

/// Build a chart in `namespace` with a minimal spec
pub fn make_chart(namespace: &str, name: &str) -> Chart {
    Chart {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: ChartSpec {
            chart_name: format!("k0s/{}", name),
            release_name: name.to_string(),
            version: "1.0.0".to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        },
        status: None,
    }
}

fn chart_list_json(items: Vec<Value>, resource_version: u64) -> String {
    json!({
        "apiVersion": CHART_API_VERSION,
        "kind": "ChartList",
        "metadata": { "resourceVersion": resource_version.to_string() },
        "items": items,
    })
    .to_string()
}

fn status_json(code: u16, reason: &str, message: String) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", format!("{} \"{}\" not found", resource, name))
}

fn already_exists_json(name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        format!("charts.helm.k0sproject.io \"{}\" already exists", name),
    )
}

fn bad_request_json(message: &str) -> String {
    status_json(400, "BadRequest", message.to_string())
}

fn invalid_json(message: &str) -> String {
    status_json(422, "Invalid", message.to_string())
}

fn method_not_allowed_json(method: &str) -> String {
    status_json(405, "MethodNotAllowed", format!("{} is not supported", method))
}

fn success_status_json(name: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Success",
        "details": { "name": name, "group": "helm.k0sproject.io", "kind": "charts" }
    })
    .to_string()
}
