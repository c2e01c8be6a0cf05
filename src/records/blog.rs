// Blog posts
//
// GET    /api/blogs
// PATCH  /api/blogs/{id}   { "isPublished": bool }
// DELETE /api/blogs/{id}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ResourceRequest;
use crate::records::{null_as_default, timestamp_field};
use crate::session::Route;
use crate::status_set;
use crate::view::{Screen, StatusSet};

status_set! {
    pub enum BlogStatus (default Draft) {
        Draft => "Draft", "draft" | "unpublished";
        Published => "Published", "published";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPatch {
    pub is_published: bool,
}

pub struct BlogScreen;

impl Screen for BlogScreen {
    type Record = BlogPost;
    type Status = BlogStatus;
    type Patch = PublishPatch;

    const NAME: &'static str = "blogs";
    const TITLE: &'static str = "Blogs";
    const ROUTE: Route = Route::Blogs;
    const COLLECTION_PATH: &'static str = "/api/blogs";
    const PAGE_SIZE: usize = 6;
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "author", "excerpt", "tags"];
    const SORT_FIELDS: &'static [&'static str] = &["title", "author", "status", "createdAt"];

    fn id(record: &BlogPost) -> &str {
        &record.id
    }

    fn status(record: &BlogPost) -> BlogStatus {
        if record.is_published {
            BlogStatus::Published
        } else {
            BlogStatus::Draft
        }
    }

    fn created_at(record: &BlogPost) -> Option<DateTime<Utc>> {
        record.created_at
    }

    fn field(record: &BlogPost, name: &str) -> Option<String> {
        match name {
            "id" => Some(record.id.clone()),
            "title" => Some(record.title.clone()),
            "slug" => record.slug.clone(),
            "author" => record.author.clone(),
            "excerpt" => record.excerpt.clone(),
            "tags" => Some(record.tags.join(", ")),
            "status" => Some(Self::status(record).label().to_string()),
            "createdAt" => timestamp_field(record.created_at),
            "updatedAt" => timestamp_field(record.updated_at),
            _ => None,
        }
    }

    fn update_request(id: &str, patch: &PublishPatch) -> ResourceRequest {
        ResourceRequest::patch(
            format!("/api/blogs/{}", id),
            Some(json!({ "isPublished": patch.is_published })),
        )
    }

    fn delete_path(id: &str) -> Option<String> {
        Some(format!("/api/blogs/{}", id))
    }
}
