// Shared test harness: scripted backend, recording navigator/notifier, fixtures.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{json, Value};

use yoga_studio_pwa::config::AppConfig;
use yoga_studio_pwa::models::Identity;
use yoga_studio_pwa::services::{HttpRequest, HttpResponse, HttpTransport, Method, Notifier};
use yoga_studio_pwa::{ApiError, AppContext, Navigator, Route};

struct Reply {
    status: u16,
    body: String,
    gate: Option<oneshot::Receiver<()>>,
}

/// In-memory stand-in for the REST API. Replies are queued per
/// (method, path); the last queued reply for a key is reused.
#[derive(Default)]
pub struct MockBackend {
    replies: RefCell<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.push(method, path, Reply { status, body, gate: None });
    }

    /// Reply only once the returned sender fires (or is dropped)
    pub fn on_held(&self, method: Method, path: &str, status: u16, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.push(method, path, Reply { status, body, gate: Some(rx) });
        tx
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// `"GET /api/session/1"` lines, in order
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| format!("{} {}", request.method, request.url))
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && request.url == path)
            .count()
    }

    fn take(&self, method: Method, path: &str) -> Option<(u16, String, Option<oneshot::Receiver<()>>)> {
        let mut replies = self.replies.borrow_mut();
        let queue = replies.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            let reply = queue.pop_front()?;
            return Some((reply.status, reply.body, reply.gate));
        }
        let reply = queue.front_mut()?;
        Some((reply.status, reply.body.clone(), reply.gate.take()))
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let (method, url) = (request.method, request.url.clone());
        self.requests.borrow_mut().push(request);

        let Some((status, body, gate)) = self.take(method, &url) else {
            return Ok(HttpResponse::new(404, json!({ "message": "not mocked" }).to_string()));
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(HttpResponse::new(status, body))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: RefCell<Vec<Route>>,
    pub backs: RefCell<usize>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Route> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.visited.borrow_mut().push(*route);
    }

    fn back(&self) {
        *self.backs.borrow_mut() += 1;
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

pub struct Harness {
    pub backend: Rc<MockBackend>,
    pub navigator: Rc<RecordingNavigator>,
    pub notifier: Rc<RecordingNotifier>,
    pub ctx: AppContext,
}

/// Context wired to the scripted backend; same-origin base URL
pub fn harness() -> Harness {
    let backend = MockBackend::new();
    let navigator = Rc::new(RecordingNavigator::default());
    let notifier = Rc::new(RecordingNotifier::default());
    let ctx = AppContext::new(
        &AppConfig::default(),
        backend.clone(),
        navigator.clone(),
        notifier.clone(),
    );
    Harness {
        backend,
        navigator,
        notifier,
        ctx,
    }
}

pub fn admin_identity() -> Identity {
    serde_json::from_value(admin_login_json()).unwrap()
}

pub fn regular_identity() -> Identity {
    serde_json::from_value(regular_login_json()).unwrap()
}

pub fn admin_login_json() -> Value {
    json!({
        "token": "admin-token",
        "type": "Bearer",
        "id": 1,
        "username": "admin",
        "firstName": "Admin",
        "lastName": "User",
        "admin": true
    })
}

pub fn regular_login_json() -> Value {
    json!({
        "token": "user-token",
        "type": "Bearer",
        "id": 2,
        "username": "user",
        "firstName": "Regular",
        "lastName": "User",
        "admin": false
    })
}

pub fn session_json(id: u64, users: &[u64]) -> Value {
    json!({
        "id": id,
        "name": format!("Yoga Session {}", id),
        "description": "A relaxing yoga session for beginners",
        "date": "2024-12-31T00:00:00.000Z",
        "teacher_id": 1,
        "users": users,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

pub fn teacher_json(id: u64) -> Value {
    json!({
        "id": id,
        "firstName": "Margot",
        "lastName": "Delahaye",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

pub fn user_json(id: u64, admin: bool) -> Value {
    json!({
        "id": id,
        "email": "user@example.com",
        "firstName": "Regular",
        "lastName": "User",
        "admin": admin,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}
