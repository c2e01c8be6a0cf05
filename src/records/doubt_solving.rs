// Doubt-solving sessions
//
// GET   /api/doubt-solving
// PATCH /api/doubt-solving/{id}   { "status": "...", "meetingLink": "..." }

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::ResourceRequest;
use crate::modal::validation::require_url;
use crate::modal::{Editable, FieldErrors};
use crate::records::{null_as_default, timestamp_field};
use crate::session::Route;
use crate::status_set;
use crate::view::{Screen, StatusSet};

status_set! {
    pub enum SessionStatus (default Pending) {
        Pending => "Pending", "pending";
        Scheduled => "Scheduled", "scheduled";
        Live => "Live", "live" | "ongoing";
        Completed => "Completed", "completed" | "done";
    }
}

impl SessionStatus {
    /// Scheduled and live sessions need somewhere to meet
    pub fn needs_meeting_link(&self) -> bool {
        matches!(self, SessionStatus::Scheduled | SessionStatus::Live)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtSession {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "description", deserialize_with = "null_as_default")]
    pub doubt: String,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtSessionPatch {
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
}

pub struct DoubtSolvingScreen;

impl Screen for DoubtSolvingScreen {
    type Record = DoubtSession;
    type Status = SessionStatus;
    type Patch = DoubtSessionPatch;

    const NAME: &'static str = "doubt-solving";
    const TITLE: &'static str = "Doubt Solving Sessions";
    const ROUTE: Route = Route::DoubtSolving;
    const COLLECTION_PATH: &'static str = "/api/doubt-solving";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "subject", "doubt"];
    const SORT_FIELDS: &'static [&'static str] =
        &["name", "email", "subject", "preferredDate", "status", "createdAt"];

    fn id(record: &DoubtSession) -> &str {
        &record.id
    }

    fn status(record: &DoubtSession) -> SessionStatus {
        record.status
    }

    fn created_at(record: &DoubtSession) -> Option<DateTime<Utc>> {
        record.created_at
    }

    fn field(record: &DoubtSession, name: &str) -> Option<String> {
        match name {
            "id" => Some(record.id.clone()),
            "name" => Some(record.name.clone()),
            "email" => Some(record.email.clone()),
            "phone" => record.phone.clone(),
            "subject" => record.subject.clone(),
            "doubt" => Some(record.doubt.clone()),
            "preferredDate" => record.preferred_date.clone(),
            "meetingLink" => record.meeting_link.clone(),
            "status" => Some(record.status.label().to_string()),
            "createdAt" => timestamp_field(record.created_at),
            "updatedAt" => timestamp_field(record.updated_at),
            _ => None,
        }
    }

    fn update_request(id: &str, patch: &DoubtSessionPatch) -> ResourceRequest {
        let mut body = Map::new();
        body.insert("status".into(), json!(patch.status.backend_value()));
        if let Some(link) = &patch.meeting_link {
            body.insert("meetingLink".into(), json!(link));
        }
        ResourceRequest::patch(format!("/api/doubt-solving/{}", id), Some(Value::Object(body)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoubtSessionForm {
    pub status: SessionStatus,
    pub meeting_link: String,
}

impl Editable for DoubtSolvingScreen {
    type Form = DoubtSessionForm;

    fn form(record: &DoubtSession) -> DoubtSessionForm {
        DoubtSessionForm {
            status: record.status,
            meeting_link: record.meeting_link.clone().unwrap_or_default(),
        }
    }

    fn validate(form: &DoubtSessionForm) -> Result<DoubtSessionPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let link = form.meeting_link.trim();

        let meeting_link = if form.status.needs_meeting_link() || !link.is_empty() {
            require_url(&mut errors, "meetingLink", "Meeting link", link)
        } else {
            None
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(DoubtSessionPatch {
            status: form.status,
            meeting_link,
        })
    }
}
