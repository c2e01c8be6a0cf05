use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Ephemeral per-screen view state. Never touches the records themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<St> {
    pub search: String,
    pub status: Option<St>,
    pub sort: Option<SortSpec>,
    /// 1-based
    pub page: usize,
}

impl<St> Default for ViewState<St> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            sort: None,
            page: 1,
        }
    }
}
