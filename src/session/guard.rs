use serde::Serialize;

use crate::auth::{Claims, CredentialValidator};
use crate::session::store::CredentialStore;

pub const MSG_LOGIN_REQUIRED: &str = "Please login to continue.";
pub const MSG_ACCESS_DENIED: &str = "Access denied. Admin privileges required.";
pub const MSG_SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Views of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Login,
    Unauthorized,
    Contact,
    JoinUs,
    ResumeReview,
    DoubtSolving,
    Mentors,
    Blogs,
}

impl Route {
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Unauthorized)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Unauthorized => "/unauthorized",
            Route::Contact => "/contact",
            Route::JoinUs => "/joinus",
            Route::ResumeReview => "/resume-review",
            Route::DoubtSolving => "/doubt-solving",
            Route::Mentors => "/mentors",
            Route::Blogs => "/blogs",
        }
    }
}

/// Why the guard refused to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    MissingCredential,
    SessionExpired,
    NotAdmin,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::MissingCredential => MSG_LOGIN_REQUIRED,
            DenyReason::SessionExpired => MSG_SESSION_EXPIRED,
            DenyReason::NotAdmin => MSG_ACCESS_DENIED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Render the requested view; claims are absent for public routes
    Render(Option<Claims>),
    Redirect {
        to: Route,
        reason: DenyReason,
    },
}

impl GuardOutcome {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardOutcome::Render(_))
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            GuardOutcome::Render(_) => None,
            GuardOutcome::Redirect { reason, .. } => Some(reason.message()),
        }
    }
}

/// Decides, per render, whether a protected view may be shown.
pub struct RouteGuard<'a> {
    store: &'a CredentialStore,
    validator: CredentialValidator,
}

impl<'a> RouteGuard<'a> {
    pub fn new(store: &'a CredentialStore) -> Self {
        Self::with_validator(store, CredentialValidator::new())
    }

    pub fn with_validator(store: &'a CredentialStore, validator: CredentialValidator) -> Self {
        Self { store, validator }
    }

    pub fn check(&self, route: Route) -> GuardOutcome {
        if !route.is_protected() {
            return GuardOutcome::Render(None);
        }
        self.evaluate()
    }

    /// Evaluate the protected-route policy. Any stored credential that fails
    /// the check is purged from both slots before redirecting.
    pub fn evaluate(&self) -> GuardOutcome {
        let Some(credential) = self.store.get() else {
            return redirect(DenyReason::MissingCredential);
        };

        let reason = match self.validator.decode(&credential) {
            Ok(claims) if CredentialValidator::is_authorized(&claims) => {
                return GuardOutcome::Render(Some(claims));
            }
            Ok(claims) => {
                tracing::warn!("credential role {:?} is not admin", claims.role);
                DenyReason::NotAdmin
            }
            Err(e) => {
                tracing::warn!("stored credential rejected: {}", e);
                DenyReason::SessionExpired
            }
        };

        if let Err(e) = self.store.clear() {
            tracing::error!("failed to purge rejected credential: {}", e);
        }

        redirect(reason)
    }
}

fn redirect(reason: DenyReason) -> GuardOutcome {
    GuardOutcome::Redirect {
        to: Route::Login,
        reason,
    }
}
