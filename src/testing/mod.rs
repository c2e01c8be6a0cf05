use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{Method, ResourceClient, ResourceRequest};
use crate::error::ApiError;

/// In-process stand-in for the backend.
///
/// GETs on a registered collection return its current value; any other call
/// pops the next scripted response for `(method, path)` or succeeds with
/// `null`. Every request is recorded in order.
#[derive(Default)]
pub struct FakeBackend {
    collections: Mutex<HashMap<String, Value>>,
    scripted: Mutex<HashMap<(&'static str, String), VecDeque<Result<Value, ApiError>>>>,
    requests: Mutex<Vec<ResourceRequest>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_collection(&self, path: &str, items: Value) {
        self.collections.lock().unwrap().insert(path.to_string(), items);
    }

    pub fn script(&self, method: Method, path: &str, response: Result<Value, ApiError>) {
        self.scripted
            .lock()
            .unwrap()
            .entry((method.as_str(), path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<ResourceRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"GET /api/contact"` style lines, handy for order assertions
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }
}

#[async_trait]
impl ResourceClient for FakeBackend {
    async fn execute(&self, request: ResourceRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let key = (request.method.as_str(), request.path.clone());
        if let Some(response) = self.scripted.lock().unwrap().get_mut(&key).and_then(VecDeque::pop_front) {
            return response;
        }
        if request.method == Method::Get {
            if let Some(items) = self.collections.lock().unwrap().get(&request.path) {
                return Ok(items.clone());
            }
            return Err(ApiError::NotFound("Not found".into()));
        }
        Ok(Value::Null)
    }
}

pub fn contact(id: &str, name: &str, status: &str, created_at: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "message": format!("Message from {}", name),
        "status": status,
        "createdAt": created_at,
    })
}

pub fn application(id: &str, name: &str, is_seen: bool, created_at: &str) -> Value {
    json!({
        "_id": id,
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "position": "Mentor",
        "isSeen": is_seen,
        "createdAt": created_at,
    })
}
