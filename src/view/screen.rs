use std::fmt::{Debug, Display};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::ResourceRequest;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::session::Route;

/// Closed set of statuses for one screen.
///
/// `label` is the canonical display value, `backend_value` what gets sent
/// on writes, and `from_backend` folds every backend synonym onto a member.
pub trait StatusSet: Copy + Eq + Debug + Display + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
    fn backend_value(&self) -> &'static str;
    fn from_backend(value: &str) -> Option<Self>;

    /// Accept either the display label or any backend spelling
    fn parse_input(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(input))
            .or_else(|| Self::from_backend(input))
    }
}

/// Declares a status enum together with its `StatusSet`, `Display` and
/// serde impls. Unknown backend values and `null` deserialize to the
/// default member.
#[macro_export]
macro_rules! status_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (default $default:ident) {
            $($variant:ident => $label:literal, $backend:literal $(| $alias:literal)*;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
        }

        impl $crate::view::StatusSet for $name {
            const ALL: &'static [Self] = &[$($name::$variant,)+];

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn backend_value(&self) -> &'static str {
                match self {
                    $($name::$variant => $backend,)+
                }
            }

            fn from_backend(value: &str) -> Option<Self> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($backend) $(|| value.eq_ignore_ascii_case($alias))* {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::view::StatusSet::label(self))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::view::StatusSet::backend_value(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let Some(raw) = <Option<String> as serde::Deserialize>::deserialize(deserializer)? else {
                    return Ok($name::$default);
                };
                Ok(<$name as $crate::view::StatusSet>::from_backend(&raw).unwrap_or_else(|| {
                    tracing::warn!("unknown {} value {:?}", stringify!($name), raw);
                    $name::$default
                }))
            }
        }
    };
}

/// Configuration of one list screen. Each screen is a thin instance of
/// this trait; all fetching, deriving and mutating lives in
/// [`ListController`](super::ListController).
pub trait Screen: Send + Sync + 'static {
    type Record: DeserializeOwned + Serialize + Clone + Debug + Send + Sync;
    type Status: StatusSet;
    type Patch: Serialize + Clone + Debug + Send + Sync;

    /// Short name used in logs and on the command line
    const NAME: &'static str;
    const TITLE: &'static str;
    const ROUTE: Route;
    const COLLECTION_PATH: &'static str;
    const PAGE_SIZE: usize = DEFAULT_PAGE_SIZE;
    const SEARCH_FIELDS: &'static [&'static str];
    const SORT_FIELDS: &'static [&'static str];

    fn id(record: &Self::Record) -> &str;
    fn status(record: &Self::Record) -> Self::Status;
    fn created_at(record: &Self::Record) -> Option<DateTime<Utc>>;

    /// Text value of a named field, used for search, sort and display
    fn field(record: &Self::Record, name: &str) -> Option<String>;

    fn update_request(id: &str, patch: &Self::Patch) -> ResourceRequest;

    fn delete_path(_id: &str) -> Option<String> {
        None
    }
}
