// "Join us" job applications
//
// GET    /api/joinus
// PATCH  /api/joinus/{id}/seen
// DELETE /api/joinus/{id}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ResourceRequest;
use crate::records::{null_as_default, timestamp_field};
use crate::session::Route;
use crate::status_set;
use crate::view::{Screen, StatusSet};

status_set! {
    /// Derived from `isSeen`; applications carry no status of their own.
    pub enum ApplicationStatus (default Unseen) {
        Unseen => "New", "unseen" | "new";
        Seen => "Seen", "seen";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_seen: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobApplication {
    /// Whether the list should flag this application as new
    pub fn shows_unseen_indicator(&self) -> bool {
        !self.is_seen
    }
}

/// Marking an application seen carries no body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkSeen;

pub struct JoinUsScreen;

impl Screen for JoinUsScreen {
    type Record = JobApplication;
    type Status = ApplicationStatus;
    type Patch = MarkSeen;

    const NAME: &'static str = "joinus";
    const TITLE: &'static str = "Job Applications";
    const ROUTE: Route = Route::JoinUs;
    const COLLECTION_PATH: &'static str = "/api/joinus";
    const SEARCH_FIELDS: &'static [&'static str] = &["fullName", "email", "phone", "position", "experience"];
    const SORT_FIELDS: &'static [&'static str] = &["fullName", "email", "position", "status", "createdAt"];

    fn id(record: &JobApplication) -> &str {
        &record.id
    }

    fn status(record: &JobApplication) -> ApplicationStatus {
        if record.is_seen {
            ApplicationStatus::Seen
        } else {
            ApplicationStatus::Unseen
        }
    }

    fn created_at(record: &JobApplication) -> Option<DateTime<Utc>> {
        record.created_at
    }

    fn field(record: &JobApplication, name: &str) -> Option<String> {
        match name {
            "id" => Some(record.id.clone()),
            "fullName" => Some(record.full_name.clone()),
            "email" => Some(record.email.clone()),
            "phone" => record.phone.clone(),
            "position" => record.position.clone(),
            "experience" => record.experience.clone(),
            "resumeUrl" => record.resume_url.clone(),
            "coverLetter" => record.cover_letter.clone(),
            "status" => Some(Self::status(record).label().to_string()),
            "createdAt" => timestamp_field(record.created_at),
            "updatedAt" => timestamp_field(record.updated_at),
            _ => None,
        }
    }

    fn update_request(id: &str, _patch: &MarkSeen) -> ResourceRequest {
        ResourceRequest::patch(format!("/api/joinus/{}/seen", id), None)
    }

    fn delete_path(id: &str) -> Option<String> {
        Some(format!("/api/joinus/{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use serde_json::json;

    #[test]
    fn seen_flag_drives_status_and_indicator() {
        let mut app: JobApplication = serde_json::from_value(json!({
            "_id": "a1",
            "fullName": "Ravi Kumar",
            "email": "ravi@example.com",
            "position": "Mentor"
        }))
        .unwrap();

        assert!(app.shows_unseen_indicator());
        assert_eq!(JoinUsScreen::status(&app), ApplicationStatus::Unseen);

        app.is_seen = true;
        assert!(!app.shows_unseen_indicator());
        assert_eq!(JoinUsScreen::field(&app, "status").as_deref(), Some("Seen"));
    }

    #[test]
    fn endpoints() {
        let request = JoinUsScreen::update_request("a1", &MarkSeen);
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/api/joinus/a1/seen");
        assert_eq!(request.body, None);
        assert_eq!(JoinUsScreen::delete_path("a1").as_deref(), Some("/api/joinus/a1"));
    }
}
