// Contact form submissions
//
// GET   /api/contact
// PATCH /api/contact/{id}   { "status": "pending" | "in-progress" | "responded" }

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ResourceRequest;
use crate::modal::{Editable, FieldErrors};
use crate::records::{null_as_default, timestamp_field};
use crate::session::Route;
use crate::status_set;
use crate::view::{Screen, StatusSet};

status_set! {
    /// Backend stores a handled message as `responded`; the console calls it Resolved.
    pub enum ContactStatus (default Pending) {
        Pending => "Pending", "pending";
        InProgress => "In Progress", "in-progress" | "in_progress" | "inprogress";
        Resolved => "Resolved", "responded" | "resolved";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
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
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPatch {
    pub status: ContactStatus,
}

pub struct ContactScreen;

impl Screen for ContactScreen {
    type Record = ContactMessage;
    type Status = ContactStatus;
    type Patch = ContactPatch;

    const NAME: &'static str = "contact";
    const TITLE: &'static str = "Contact Requests";
    const ROUTE: Route = Route::Contact;
    const COLLECTION_PATH: &'static str = "/api/contact";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "phone", "subject", "message"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "email", "subject", "status", "createdAt"];

    fn id(record: &ContactMessage) -> &str {
        &record.id
    }

    fn status(record: &ContactMessage) -> ContactStatus {
        record.status
    }

    fn created_at(record: &ContactMessage) -> Option<DateTime<Utc>> {
        record.created_at
    }

    fn field(record: &ContactMessage, name: &str) -> Option<String> {
        match name {
            "id" => Some(record.id.clone()),
            "name" => Some(record.name.clone()),
            "email" => Some(record.email.clone()),
            "phone" => record.phone.clone(),
            "subject" => record.subject.clone(),
            "message" => Some(record.message.clone()),
            "status" => Some(record.status.label().to_string()),
            "createdAt" => timestamp_field(record.created_at),
            "updatedAt" => timestamp_field(record.updated_at),
            _ => None,
        }
    }

    fn update_request(id: &str, patch: &ContactPatch) -> ResourceRequest {
        ResourceRequest::patch(
            format!("/api/contact/{}", id),
            Some(json!({ "status": patch.status.backend_value() })),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub status: ContactStatus,
}

impl Editable for ContactScreen {
    type Form = ContactForm;

    fn form(record: &ContactMessage) -> ContactForm {
        ContactForm {
            status: record.status,
        }
    }

    fn validate(form: &ContactForm) -> Result<ContactPatch, FieldErrors> {
        Ok(ContactPatch {
            status: form.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responded_reads_as_resolved() {
        let record: ContactMessage = serde_json::from_value(json!({
            "_id": "c1",
            "name": "Meera",
            "email": "meera@example.com",
            "message": "Need help",
            "status": "responded",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(record.status, ContactStatus::Resolved);
        assert_eq!(ContactScreen::field(&record, "status").as_deref(), Some("Resolved"));
        assert_eq!(record.status.to_string(), "Resolved");
    }

    #[test]
    fn resolved_is_sent_as_responded() {
        let request = ContactScreen::update_request(
            "c1",
            &ContactPatch {
                status: ContactStatus::Resolved,
            },
        );
        assert_eq!(request.path, "/api/contact/c1");
        assert_eq!(request.body, Some(json!({ "status": "responded" })));
    }

    #[test]
    fn status_input_accepts_labels_and_synonyms() {
        assert_eq!(ContactStatus::parse_input("In Progress"), Some(ContactStatus::InProgress));
        assert_eq!(ContactStatus::parse_input("in-progress"), Some(ContactStatus::InProgress));
        assert_eq!(ContactStatus::parse_input("resolved"), Some(ContactStatus::Resolved));
        assert_eq!(ContactStatus::parse_input("archived"), None);
    }

    #[test]
    fn unknown_backend_status_defaults_to_pending() {
        let status: ContactStatus = serde_json::from_value(json!("escalated")).unwrap();
        assert_eq!(status, ContactStatus::Pending);
    }

    #[test]
    fn null_values_read_as_defaults() {
        let record: ContactMessage = serde_json::from_value(json!({
            "_id": "c2",
            "name": "Arjun",
            "email": null,
            "message": null,
            "status": null
        }))
        .unwrap();

        assert_eq!(record.email, "");
        assert_eq!(record.message, "");
        assert_eq!(record.status, ContactStatus::Pending);
    }
}
