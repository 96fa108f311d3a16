//! Shared harness for integration tests: a scripted in-memory transport.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use zoekdeware::api::{ApiError, ApiResult, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use zoekdeware::{ApiClient, CredentialStore, MemoryStorage};

pub const BASE_URL: &str = "http://test.local/api/v1";

type Route = (HttpMethod, String);

/// Transport that answers from per-route queues and records every request
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<HashMap<Route, VecDeque<ApiResult<HttpResponse>>>>,
    gates: Mutex<HashMap<Route, Arc<Notify>>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a JSON response for the next call to `method path`
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                body: serde_json::to_vec(&body).unwrap(),
            }),
        );
    }

    /// Queue a raw body, for malformed payloads
    pub fn respond_raw(&self, method: HttpMethod, path: &str, status: u16, body: &[u8]) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            }),
        );
    }

    /// Queue a transport failure
    pub fn fail(&self, method: HttpMethod, path: &str) {
        self.push(
            method,
            path,
            Err(ApiError::InvalidResponse("connection reset".to_string())),
        );
    }

    /// Hold the next call to `method path` until the returned gate is opened
    pub fn gate(&self, method: HttpMethod, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert((method, path.to_string()), notify.clone());
        notify
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of recorded calls to `method path`
    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && route_path(r) == path)
            .count()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn push(&self, method: HttpMethod, path: &str, response: ApiResult<HttpResponse>) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }
}

/// Path relative to the API prefix, with the query string if any
pub fn route_path(request: &HttpRequest) -> String {
    let path = request
        .url
        .path()
        .trim_start_matches("/api/v1")
        .to_string();
    match request.url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    }
}

/// Decoded JSON body of a recorded request
pub fn body_json(request: &HttpRequest) -> Option<Value> {
    request
        .body
        .as_ref()
        .map(|body| serde_json::from_slice(body).unwrap())
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let route = (request.method, route_path(&request));
        self.requests.lock().unwrap().push(request);

        let gate = self.gates.lock().unwrap().remove(&route);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front);
        next.unwrap_or_else(|| {
            Err(ApiError::InvalidResponse(format!(
                "no scripted response for {} {}",
                route.0, route.1
            )))
        })
    }
}

/// Services a screen would be handed at construction
pub struct Harness {
    pub transport: Arc<FakeTransport>,
    pub credentials: Arc<CredentialStore>,
    pub api: Arc<ApiClient>,
}

pub fn harness() -> Harness {
    let transport = FakeTransport::new();
    let credentials = Arc::new(CredentialStore::new(Arc::new(MemoryStorage::new())));
    let api = Arc::new(ApiClient::with_transport(
        BASE_URL,
        transport.clone(),
        credentials.clone(),
    ));
    Harness {
        transport,
        credentials,
        api,
    }
}

pub fn auth_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_at": 1_900_000_000_i64
    })
}

pub fn error_json(message: &str) -> Value {
    json!({ "error": message })
}

pub fn candidate_json(id: &str) -> Value {
    json!({
        "id": id,
        "display_name": format!("Member {id}"),
        "age": 29,
        "bio": null,
        "photos": [format!("https://cdn.test/{id}.jpg")],
        "distance_km": 3.2
    })
}

pub fn page_json(ids: &[&str]) -> Value {
    json!({ "profiles": ids.iter().map(|id| candidate_json(id)).collect::<Vec<_>>() })
}

pub fn match_json(id: &str, member_id: &str) -> Value {
    json!({
        "id": id,
        "member_id": member_id,
        "display_name": format!("Member {member_id}"),
        "photo_url": null,
        "matched_at": "2024-05-01T12:30:00Z"
    })
}

pub fn message_json(id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "sender_id": "me",
        "content": content,
        "sent_at": "2024-05-01T12:31:00Z",
        "read_at": null
    })
}

pub fn conversation_json(id: &str) -> Value {
    json!({
        "id": id,
        "participant": {"id": "u2", "display_name": "Bo", "photo_url": null},
        "last_message": null,
        "unread_count": 0
    })
}

pub fn profile_json(display_name: &str) -> Value {
    json!({
        "id": "me",
        "email": "ada@example.com",
        "display_name": display_name,
        "bio": null,
        "birth_date": "1994-06-15T00:00:00Z",
        "gender": "female",
        "interests": ["climbing"],
        "photos": []
    })
}
