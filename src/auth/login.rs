// Login and logout flows
//
// POST /api/auth/login  { username, password }  ->  { token, user: { role } }

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::{ResourceClient, ResourceRequest};
use crate::auth::{Claims, Credential, CredentialValidator, DecodeError, ADMIN_ROLE};
use crate::error::ApiError;
use crate::session::guard::MSG_ACCESS_DENIED;
use crate::session::store::{CredentialStore, StoreError};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const MSG_INVALID_LOGIN: &str = "Invalid username or password";
pub const MSG_MISSING_FIELDS: &str = "Please enter both username and password";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("{}", MSG_MISSING_FIELDS)]
    MissingFields,
    #[error("{}", MSG_INVALID_LOGIN)]
    InvalidCredentials,
    #[error("{}", MSG_ACCESS_DENIED)]
    AccessDenied,
    #[error("Login returned an unusable credential: {0}")]
    InvalidToken(#[from] DecodeError),
    #[error("{0}")]
    Api(ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Exchange username/password for a credential and keep it in session scope.
///
/// Nothing is stored unless the backend accepted the login and the returned
/// credential belongs to an admin.
pub async fn login<C>(
    client: &C,
    store: &CredentialStore,
    request: &LoginRequest,
) -> Result<Claims, LoginError>
where
    C: ResourceClient + ?Sized,
{
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    let payload = client
        .execute(ResourceRequest::post(
            LOGIN_PATH,
            json!({ "username": request.username.trim(), "password": request.password }),
        ))
        .await
        .map_err(|e| match e {
            ApiError::Unauthorized(_)
            | ApiError::BadRequest(_)
            | ApiError::NotFound(_)
            | ApiError::Rejected(_) => LoginError::InvalidCredentials,
            other => LoginError::Api(other),
        })?;

    let response: LoginResponse = serde_json::from_value(payload).map_err(|e| {
        tracing::warn!("unexpected login response: {}", e);
        LoginError::Api(ApiError::MalformedBody(crate::error::GENERIC_FAILURE.to_string()))
    })?;

    let credential = Credential::new(response.token);
    let claims = CredentialValidator::new().decode(&credential)?;

    // The guard only ever sees the credential, so its role is what counts;
    // a contradicting `user.role` is refused as well.
    let user_role = response.user.as_ref().and_then(|u| u.role.as_deref());
    if !CredentialValidator::is_authorized(&claims) || user_role.is_some_and(|r| r != ADMIN_ROLE) {
        tracing::warn!(
            "login for {} rejected: role {:?}",
            request.username.trim(),
            user_role.or(claims.role.as_deref())
        );
        return Err(LoginError::AccessDenied);
    }

    store.set(&credential)?;
    tracing::info!("admin {} logged in", request.username.trim());

    Ok(claims)
}

pub fn logout(store: &CredentialStore) -> Result<(), StoreError> {
    store.clear()
}
