//! Screen configurations: one record type, status set and endpoint map per
//! admin screen, each plugged into the generic list controller.

pub mod blog;
pub mod contact;
pub mod doubt_solving;
pub mod joinus;
pub mod mentor;
pub mod resume_review;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

pub use blog::{BlogPost, BlogScreen, BlogStatus, PublishPatch};
pub use contact::{ContactMessage, ContactPatch, ContactScreen, ContactStatus};
pub use doubt_solving::{DoubtSession, DoubtSessionPatch, DoubtSolvingScreen, SessionStatus};
pub use joinus::{ApplicationStatus, JobApplication, JoinUsScreen, MarkSeen};
pub use mentor::{Mentor, MentorPatch, MentorScreen, MentorStatus};
pub use resume_review::{ResumeReviewPatch, ResumeReviewRequest, ResumeReviewScreen, ReviewStatus};

/// RFC 3339 in UTC with millisecond precision, so string order is time order
pub(crate) fn timestamp_field(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Reads an explicit `null` the same as a missing key, so one sparse row
/// cannot fail a whole collection
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
