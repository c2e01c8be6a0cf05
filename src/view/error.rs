use thiserror::Error;

use crate::error::ApiError;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid page: {0} (pages start at 1)")]
    InvalidPage(usize),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("No record with id {0}")]
    UnknownRecord(String),

    #[error("{screen} does not support {action}")]
    Unsupported {
        screen: &'static str,
        action: &'static str,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}
