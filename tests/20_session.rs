mod common;

use anyhow::Result;
use serde_json::json;
use url::Url;

use vts_admin::auth::{Credential, CredentialValidator};
use vts_admin::session::{consume_entry_token, DenyReason, GuardOutcome, Route, RouteGuard, Scope};

#[test]
fn clear_is_idempotent_on_disk() -> Result<()> {
    let ws = common::Workspace::new()?;
    ws.store.set_in(Scope::Cookie, &Credential::new("a"))?;
    ws.store.set_in(Scope::Session, &Credential::new("b"))?;

    ws.store.clear()?;
    assert_eq!(ws.store.get(), None);
    ws.store.clear()?;
    assert_eq!(ws.store.get(), None);

    assert!(!ws.dir.path().join("cookie").exists());
    assert!(!ws.dir.path().join("session").exists());
    Ok(())
}

#[test]
fn guard_purges_both_files_for_non_admin() -> Result<()> {
    let ws = common::Workspace::new()?;
    let student = Credential::new(common::student_token());
    ws.store.set_in(Scope::Cookie, &student)?;
    ws.store.set_in(Scope::Session, &student)?;

    let outcome = RouteGuard::new(&ws.store).check(Route::ResumeReview);
    assert_eq!(
        outcome,
        GuardOutcome::Redirect {
            to: Route::Login,
            reason: DenyReason::NotAdmin,
        }
    );
    assert_eq!(outcome.message(), Some("Access denied. Admin privileges required."));
    assert_eq!(ws.store.peek(Scope::Cookie), None);
    assert_eq!(ws.store.peek(Scope::Session), None);
    Ok(())
}

#[test]
fn expired_admin_credential_means_session_expired() -> Result<()> {
    let ws = common::Workspace::new()?;
    let expired = common::token(json!({ "role": "admin", "exp": 1_600_000_000 }));
    ws.store.set(&Credential::new(expired))?;

    let outcome = RouteGuard::new(&ws.store).check(Route::Mentors);
    assert_eq!(outcome.message(), Some("Session expired. Please login again."));
    assert_eq!(ws.store.get(), None);
    Ok(())
}

#[test]
fn garbage_in_cookie_file_is_purged() -> Result<()> {
    let ws = common::Workspace::new()?;
    std::fs::write(ws.dir.path().join("cookie"), "definitely-not-a-jwt")?;
    ws.store.set(&Credential::new(common::admin_token()))?;

    // the cookie slot wins, so its garbage decides the outcome
    let outcome = RouteGuard::new(&ws.store).check(Route::Contact);
    assert!(!outcome.is_render());
    assert_eq!(ws.store.get(), None);
    Ok(())
}

#[test]
fn entry_token_is_stored_and_stripped() -> Result<()> {
    let ws = common::Workspace::new()?;
    let token = common::admin_token();
    let entry = Url::parse(&format!("https://admin.vts.test/contact?tab=new&token={}&page=2", token))?;

    let result = consume_entry_token(&entry, &ws.store, &CredentialValidator::new())?;

    assert!(result.stored);
    assert_eq!(result.url.as_str(), "https://admin.vts.test/contact?tab=new&page=2");
    assert_eq!(ws.store.peek(Scope::Session), Some(Credential::new(token)));
    assert!(RouteGuard::new(&ws.store).check(Route::Contact).is_render());
    Ok(())
}

#[test]
fn undecodable_entry_token_is_dropped() -> Result<()> {
    let ws = common::Workspace::new()?;
    let entry = Url::parse("https://admin.vts.test/?token=abc")?;

    let result = consume_entry_token(&entry, &ws.store, &CredentialValidator::new())?;

    assert!(!result.stored);
    assert_eq!(result.url.as_str(), "https://admin.vts.test/");
    assert_eq!(ws.store.get(), None);
    Ok(())
}
