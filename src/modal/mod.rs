//! Detail/edit modal bound to one record snapshot.
//!
//! The modal owns a copy of the record and a draft form built from it.
//! Editing the draft never touches the list; `submit` validates locally and
//! only then hands the resulting patch to [`ListController::mutate`].

pub mod validation;

use std::collections::BTreeMap;
use std::fmt::Debug;

use thiserror::Error;

use crate::view::{ListController, Screen, ViewError};

/// Field name -> message shown next to that field
pub type FieldErrors = BTreeMap<String, String>;

/// A screen whose records can be edited through a form
pub trait Editable: Screen {
    type Form: Clone + Debug + Send;

    fn form(record: &Self::Record) -> Self::Form;
    fn validate(form: &Self::Form) -> Result<Self::Patch, FieldErrors>;
}

#[derive(Error, Debug)]
pub enum ModalError {
    #[error("Please fix the highlighted fields")]
    Validation(FieldErrors),

    #[error("A save is already in progress")]
    InFlight,

    #[error(transparent)]
    Failed(#[from] ViewError),
}

pub struct EditModal<S: Editable> {
    snapshot: S::Record,
    draft: S::Form,
    errors: FieldErrors,
    submitting: bool,
}

impl<S: Editable> EditModal<S> {
    pub fn open(record: &S::Record) -> Self {
        Self {
            snapshot: record.clone(),
            draft: S::form(record),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn open_by_id(controller: &ListController<S>, id: &str) -> Result<Self, ViewError> {
        controller
            .find(id)
            .map(Self::open)
            .ok_or_else(|| ViewError::UnknownRecord(id.to_string()))
    }

    pub fn id(&self) -> &str {
        S::id(&self.snapshot)
    }

    pub fn snapshot(&self) -> &S::Record {
        &self.snapshot
    }

    pub fn draft(&self) -> &S::Form {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut S::Form {
        &mut self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submitting
    }

    /// Validate the draft and mark the modal as submitting.
    ///
    /// Fails with `InFlight` while a previous submit is unsettled and with
    /// `Validation` when the draft does not pass; neither touches the network.
    pub fn begin_submit(&mut self) -> Result<S::Patch, ModalError> {
        if self.submitting {
            return Err(ModalError::InFlight);
        }
        match S::validate(&self.draft) {
            Ok(patch) => {
                self.errors.clear();
                self.submitting = true;
                Ok(patch)
            }
            Err(errors) => {
                tracing::debug!("{}: {} field error(s) on {}", S::NAME, errors.len(), self.id());
                self.errors = errors.clone();
                Err(ModalError::Validation(errors))
            }
        }
    }

    /// Settle a submit started with [`begin_submit`](Self::begin_submit)
    pub fn finish_submit(&mut self, result: Result<(), ViewError>) -> Result<(), ModalError> {
        self.submitting = false;
        result.map_err(ModalError::from)
    }

    pub async fn submit(&mut self, controller: &mut ListController<S>) -> Result<(), ModalError> {
        let patch = self.begin_submit()?;
        let id = S::id(&self.snapshot).to_string();
        let result = controller.mutate(&id, &patch).await;
        self.finish_submit(result)
    }
}
