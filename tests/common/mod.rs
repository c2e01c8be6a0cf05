#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;

use vts_admin::api::HttpClient;
use vts_admin::auth::Credential;
use vts_admin::session::CredentialStore;

/// Far enough in the future that nothing expires mid-test
pub const NEVER: i64 = 4_102_444_800;

/// Sign a payload with an arbitrary key; the console never verifies signatures
pub fn token(payload: Value) -> String {
    encode(&Header::default(), &payload, &EncodingKey::from_secret(b"integration"))
        .expect("encode test token")
}

pub fn admin_token() -> String {
    token(json!({ "role": "admin", "username": "asha", "exp": NEVER }))
}

pub fn student_token() -> String {
    token(json!({ "role": "student", "username": "ravi", "exp": NEVER }))
}

/// File-backed credential store in a fresh temp directory
pub struct Workspace {
    pub dir: TempDir,
    pub store: CredentialStore,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let store = CredentialStore::in_dir(dir.path());
        Ok(Self { dir, store })
    }
}

pub fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri())
}

pub fn admin_client(server: &MockServer) -> Arc<HttpClient> {
    Arc::new(client(server).with_credential(Credential::new(admin_token())))
}

pub fn enveloped(data: Value) -> Value {
    json!({ "success": true, "data": data })
}
