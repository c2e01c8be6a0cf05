// Mentor profiles shown on the public site
//
// GET /api/mentors
// PUT /api/mentors/{id}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use crate::api::ResourceRequest;
use crate::modal::validation::{require_min, require_text};
use crate::modal::{Editable, FieldErrors};
use crate::records::{null_as_default, timestamp_field};
use crate::session::Route;
use crate::status_set;
use crate::view::{Screen, StatusSet};

status_set! {
    /// Derived from `isActive`.
    pub enum MentorStatus (default Active) {
        Active => "Active", "active";
        Inactive => "Inactive", "inactive" | "hidden";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub designation: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expertise: Vec<String>,
    #[serde(default = "default_order", deserialize_with = "order_or_default")]
    pub order: i64,
    #[serde(default = "default_active", deserialize_with = "active_or_default")]
    pub is_active: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_order() -> i64 {
    1
}

fn default_active() -> bool {
    true
}

fn order_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(default_order))
}

fn active_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_active))
}

/// Maps an order onto a fixed-width key whose string order is numeric
/// order, negatives included
fn order_key(order: i64) -> String {
    format!("{:020}", (order as u64) ^ (1 << 63))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorPatch {
    pub name: String,
    pub designation: String,
    pub company: Option<String>,
    pub expertise: Vec<String>,
    pub order: i64,
    pub is_active: bool,
}

pub struct MentorScreen;

impl Screen for MentorScreen {
    type Record = Mentor;
    type Status = MentorStatus;
    type Patch = MentorPatch;

    const NAME: &'static str = "mentors";
    const TITLE: &'static str = "Mentors";
    const ROUTE: Route = Route::Mentors;
    const COLLECTION_PATH: &'static str = "/api/mentors";
    const PAGE_SIZE: usize = 10;
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "designation", "company", "expertise"];
    const SORT_FIELDS: &'static [&'static str] = &["name", "designation", "company", "order", "status", "createdAt"];

    fn id(record: &Mentor) -> &str {
        &record.id
    }

    fn status(record: &Mentor) -> MentorStatus {
        if record.is_active {
            MentorStatus::Active
        } else {
            MentorStatus::Inactive
        }
    }

    fn created_at(record: &Mentor) -> Option<DateTime<Utc>> {
        record.created_at
    }

    fn field(record: &Mentor, name: &str) -> Option<String> {
        match name {
            "id" => Some(record.id.clone()),
            "name" => Some(record.name.clone()),
            "designation" => Some(record.designation.clone()),
            "company" => record.company.clone(),
            "expertise" => Some(record.expertise.join(", ")),
            "order" => Some(order_key(record.order)),
            "status" => Some(Self::status(record).label().to_string()),
            "createdAt" => timestamp_field(record.created_at),
            "updatedAt" => timestamp_field(record.updated_at),
            _ => None,
        }
    }

    fn update_request(id: &str, patch: &MentorPatch) -> ResourceRequest {
        ResourceRequest::put(format!("/api/mentors/{}", id), json!(patch))
    }
}

/// Raw modal inputs; `order` stays text until validated
#[derive(Debug, Clone, PartialEq)]
pub struct MentorForm {
    pub name: String,
    pub designation: String,
    pub company: String,
    pub expertise: String,
    pub order: String,
    pub is_active: bool,
}

impl Editable for MentorScreen {
    type Form = MentorForm;

    fn form(record: &Mentor) -> MentorForm {
        MentorForm {
            name: record.name.clone(),
            designation: record.designation.clone(),
            company: record.company.clone().unwrap_or_default(),
            expertise: record.expertise.join(", "),
            order: record.order.to_string(),
            is_active: record.is_active,
        }
    }

    fn validate(form: &MentorForm) -> Result<MentorPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require_text(&mut errors, "name", "Name", &form.name);
        let designation = require_text(&mut errors, "designation", "Designation", &form.designation);
        let order = require_min(&mut errors, "order", "Order", &form.order, 1);

        match (name, designation, order) {
            (Some(name), Some(designation), Some(order)) if errors.is_empty() => {
                let company = form.company.trim();
                Ok(MentorPatch {
                    name,
                    designation,
                    company: (!company.is_empty()).then(|| company.to_string()),
                    expertise: form
                        .expertise
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                    order,
                    is_active: form.is_active,
                })
            }
            _ => Err(errors),
        }
    }
}
