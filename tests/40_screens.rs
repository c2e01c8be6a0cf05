mod common;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vts_admin::modal::{EditModal, ModalError};
use vts_admin::records::{
    BlogScreen, ContactScreen, ContactStatus, JoinUsScreen, MarkSeen, MentorScreen,
};
use vts_admin::view::{ListController, RemoveOutcome, Screen, StatusSet};

fn application(seen: bool) -> serde_json::Value {
    json!({
        "_id": "a1",
        "fullName": "Ravi Kumar",
        "email": "ravi@example.com",
        "position": "Mentor",
        "isSeen": seen,
        "createdAt": "2024-05-01T10:00:00.000Z"
    })
}

#[tokio::test]
async fn mark_seen_patches_once_reloads_and_clears_indicator() -> Result<()> {
    let server = MockServer::start().await;
    // first load sees the application unseen, the reload after the patch sees it seen
    Mock::given(method("GET"))
        .and(path("/api/joinus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::enveloped(json!([application(false)]))))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/joinus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::enveloped(json!([application(true)]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/joinus/a1/seen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = ListController::<JoinUsScreen>::new(common::admin_client(&server));
    list.load().await?;
    assert!(list.find("a1").is_some_and(|a| a.shows_unseen_indicator()));

    list.mutate("a1", &MarkSeen).await?;

    let app = list.find("a1").expect("application still listed");
    assert!(!app.shows_unseen_indicator());
    assert_eq!(JoinUsScreen::status(app).label(), "Seen");
    assert!(!list.is_loading());
    Ok(())
}

#[tokio::test]
async fn responded_displays_resolved_and_saves_back_as_responded() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "_id": "c1",
                "name": "Meera",
                "email": "meera@example.com",
                "message": "Please call back",
                "status": "responded",
                "createdAt": "2024-05-02T08:30:00.000Z"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/contact/c1"))
        .and(body_json(json!({ "status": "responded" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = ListController::<ContactScreen>::new(common::admin_client(&server));
    list.load().await?;

    let view = list.projection()?;
    let listed = view.records().next().expect("one record");
    assert_eq!(ContactScreen::field(listed, "status").as_deref(), Some("Resolved"));
    assert_eq!(view.groups[0].label, "5/2/2024");

    let mut modal = EditModal::<ContactScreen>::open_by_id(&list, "c1")?;
    assert_eq!(modal.draft().status.to_string(), "Resolved");

    modal.draft_mut().status = ContactStatus::parse_input("Resolved").expect("known label");
    modal.submit(&mut list).await?;
    assert_eq!(list.alert(), None);
    Ok(())
}

#[tokio::test]
async fn invalid_mentor_order_is_caught_before_any_write() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mentors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "m1", "name": "Anita Rao", "designation": "Staff Engineer", "order": 2, "isActive": true }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/mentors/m1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut list = ListController::<MentorScreen>::new(common::admin_client(&server));
    list.load().await?;

    let mut modal = EditModal::<MentorScreen>::open_by_id(&list, "m1")?;
    modal.draft_mut().order = "0".into();
    modal.draft_mut().name = "".into();

    match modal.submit(&mut list).await {
        Err(ModalError::Validation(errors)) => {
            assert_eq!(errors["order"], "Order must be at least 1");
            assert_eq!(errors["name"], "Name is required");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn blog_delete_needs_confirmation_and_failure_raises_alert() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blogs": [{ "_id": "b1", "title": "Draft post", "isPublished": false }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/blogs/b1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Only owners may delete" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = ListController::<BlogScreen>::new(common::admin_client(&server));
    list.load().await?;

    assert_eq!(list.remove("b1", |_| false).await?, RemoveOutcome::Cancelled);

    let err = list.remove("b1", |post| post.title == "Draft post").await.unwrap_err();
    assert!(err.to_string().contains("Only owners may delete"));
    assert_eq!(list.alert(), Some("Only owners may delete"));
    assert_eq!(list.records().len(), 1);
    Ok(())
}
