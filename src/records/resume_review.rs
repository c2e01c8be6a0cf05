// Resume review requests
//
// GET /api/resume-review
// PUT /api/resume-review/{id}   { "assignedMentor": "...", "status": "..." }

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ResourceRequest;
use crate::modal::validation::require_text;
use crate::modal::{Editable, FieldErrors};
use crate::records::{null_as_default, timestamp_field};
use crate::session::Route;
use crate::status_set;
use crate::view::{Screen, StatusSet};

status_set! {
    pub enum ReviewStatus (default Pending) {
        Pending => "Pending", "pending";
        InProgress => "In Progress", "in-progress" | "in_progress" | "assigned";
        Completed => "Completed", "completed" | "reviewed" | "done";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReviewRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default, alias = "mentor")]
    pub assigned_mentor: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReviewPatch {
    pub assigned_mentor: String,
    pub status: ReviewStatus,
}

pub struct ResumeReviewScreen;

impl Screen for ResumeReviewScreen {
    type Record = ResumeReviewRequest;
    type Status = ReviewStatus;
    type Patch = ResumeReviewPatch;

    const NAME: &'static str = "resume-review";
    const TITLE: &'static str = "Resume Reviews";
    const ROUTE: Route = Route::ResumeReview;
    const COLLECTION_PATH: &'static str = "/api/resume-review";
    const SEARCH_FIELDS: &'static [&'static str] =
        &["name", "email", "phone", "targetRole", "assignedMentor"];
    const SORT_FIELDS: &'static [&'static str] =
        &["name", "email", "targetRole", "assignedMentor", "status", "createdAt"];

    fn id(record: &ResumeReviewRequest) -> &str {
        &record.id
    }

    fn status(record: &ResumeReviewRequest) -> ReviewStatus {
        record.status
    }

    fn created_at(record: &ResumeReviewRequest) -> Option<DateTime<Utc>> {
        record.created_at
    }

    fn field(record: &ResumeReviewRequest, name: &str) -> Option<String> {
        match name {
            "id" => Some(record.id.clone()),
            "name" => Some(record.name.clone()),
            "email" => Some(record.email.clone()),
            "phone" => record.phone.clone(),
            "targetRole" => record.target_role.clone(),
            "resumeUrl" => record.resume_url.clone(),
            "assignedMentor" => record.assigned_mentor.clone(),
            "status" => Some(record.status.label().to_string()),
            "createdAt" => timestamp_field(record.created_at),
            "updatedAt" => timestamp_field(record.updated_at),
            _ => None,
        }
    }

    fn update_request(id: &str, patch: &ResumeReviewPatch) -> ResourceRequest {
        ResourceRequest::put(
            format!("/api/resume-review/{}", id),
            json!({
                "assignedMentor": patch.assigned_mentor,
                "status": patch.status.backend_value(),
            }),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeReviewForm {
    pub assigned_mentor: String,
    pub status: ReviewStatus,
}

impl Editable for ResumeReviewScreen {
    type Form = ResumeReviewForm;

    fn form(record: &ResumeReviewRequest) -> ResumeReviewForm {
        ResumeReviewForm {
            assigned_mentor: record.assigned_mentor.clone().unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(form: &ResumeReviewForm) -> Result<ResumeReviewPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mentor = require_text(&mut errors, "assignedMentor", "Mentor", &form.assigned_mentor);

        match mentor {
            Some(mentor) if errors.is_empty() => Ok(ResumeReviewPatch {
                assigned_mentor: mentor,
                status: form.status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;

    #[test]
    fn mentor_is_required() {
        let form = ResumeReviewForm {
            assigned_mentor: "  ".into(),
            status: ReviewStatus::InProgress,
        };
        let errors = ResumeReviewScreen::validate(&form).unwrap_err();
        assert_eq!(errors.get("assignedMentor").map(String::as_str), Some("Mentor is required"));
    }

    #[test]
    fn update_is_a_put_with_mentor_and_status() {
        let patch = ResumeReviewScreen::validate(&ResumeReviewForm {
            assigned_mentor: " Dr. Iyer ".into(),
            status: ReviewStatus::Completed,
        })
        .unwrap();

        let request = ResumeReviewScreen::update_request("r9", &patch);
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/api/resume-review/r9");
        assert_eq!(
            request.body,
            Some(json!({ "assignedMentor": "Dr. Iyer", "status": "completed" }))
        );
    }
}
