use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};

use super::error::ViewError;
use super::projection::{project, Projection};
use super::screen::Screen;
use super::types::{SortSpec, ViewState};
use super::view_order::ViewOrder;
use crate::api::{fetch_items, ResourceClient, ResourceRequest};
use crate::error::ApiError;

/// Handle for one issued load; only the most recently issued ticket may
/// change the controller when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    Failed(ApiError),
    /// A newer load was issued; this response was dropped
    Stale,
    /// The screen went away while the request was in flight
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Cancelled,
}

/// Fetch + derive + mutate controller shared by every list screen.
pub struct ListController<S: Screen> {
    client: Arc<dyn ResourceClient>,
    records: Vec<S::Record>,
    state: ViewState<S::Status>,
    page_size: usize,
    offset: FixedOffset,
    loading: bool,
    error: Option<String>,
    alert: Option<String>,
    issued: u64,
    mounted: bool,
}

impl<S: Screen> ListController<S> {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            records: Vec::new(),
            state: ViewState::default(),
            page_size: S::PAGE_SIZE,
            offset: Utc.fix(),
            loading: false,
            error: None,
            alert: None,
            issued: 0,
            mounted: true,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Offset used to turn creation timestamps into calendar dates
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&S::Record> {
        self.records.iter().find(|r| S::id(r) == id)
    }

    pub fn state(&self) -> &ViewState<S::Status> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Latest load failure, shown inline
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Latest failed mutation; stays until acknowledged
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn acknowledge_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search = query.into();
        self.state.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<S::Status>) {
        self.state.status = status;
        self.state.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<(), ViewError> {
        let sort = match sort {
            Some(spec) => {
                let field = ViewOrder::resolve(&spec.field, S::SORT_FIELDS)?;
                Some(SortSpec {
                    field: field.to_string(),
                    direction: spec.direction,
                })
            }
            None => None,
        };
        self.state.sort = sort;
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), ViewError> {
        if page == 0 {
            return Err(ViewError::InvalidPage(page));
        }
        self.state.page = page;
        Ok(())
    }

    /// Back to the defaults a freshly mounted screen starts with
    pub fn reset_view(&mut self) {
        self.state = ViewState::default();
    }

    pub fn projection(&self) -> Result<Projection<'_, S::Record>, ViewError> {
        project::<S>(&self.records, &self.state, self.page_size, self.offset)
    }

    /// Mark a load as issued. Pair with [`complete_load`](Self::complete_load).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        // an unmounted controller never settles a load
        self.loading = self.mounted;
        LoadTicket { seq: self.issued }
    }

    /// Apply a load result. Only the latest ticket of a mounted controller
    /// touches state; that settles the loading flag whatever the result.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<S::Record>, ApiError>,
    ) -> LoadOutcome {
        if !self.mounted {
            tracing::debug!("{}: dropping load #{} after unmount", S::NAME, ticket.seq);
            return LoadOutcome::Unmounted;
        }
        if ticket.seq != self.issued {
            tracing::debug!(
                "{}: dropping stale load #{} (latest #{})",
                S::NAME,
                ticket.seq,
                self.issued
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                tracing::debug!("{}: loaded {} records", S::NAME, records.len());
                self.records = records;
                self.error = None;
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("{}: load failed: {}", S::NAME, e);
                self.error = Some(e.message().to_string());
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Pull the full collection from the backend, replacing what we hold.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        if !self.mounted {
            tracing::debug!("{}: load skipped after unmount", S::NAME);
            return Ok(());
        }
        let ticket = self.begin_load();
        let result = fetch_items::<S::Record, _>(self.client.as_ref(), S::COLLECTION_PATH).await;
        match self.complete_load(ticket, result) {
            LoadOutcome::Failed(e) => Err(e),
            _ => Ok(()),
        }
    }

    /// Send a partial update, then reload everything on success. A failed
    /// update raises the blocking alert and leaves the collection as is.
    pub async fn mutate(&mut self, id: &str, patch: &S::Patch) -> Result<(), ViewError> {
        let request = S::update_request(id, patch);
        self.run_mutation(request).await
    }

    /// Delete a record after `confirm` approves it, then reload.
    pub async fn remove<F>(&mut self, id: &str, confirm: F) -> Result<RemoveOutcome, ViewError>
    where
        F: FnOnce(&S::Record) -> bool,
    {
        let path = S::delete_path(id).ok_or(ViewError::Unsupported {
            screen: S::NAME,
            action: "delete",
        })?;
        let record = self
            .find(id)
            .ok_or_else(|| ViewError::UnknownRecord(id.to_string()))?;

        if !confirm(record) {
            tracing::debug!("{}: delete of {} cancelled", S::NAME, id);
            return Ok(RemoveOutcome::Cancelled);
        }

        self.run_mutation(ResourceRequest::delete(path)).await?;
        Ok(RemoveOutcome::Removed)
    }

    async fn run_mutation(&mut self, request: ResourceRequest) -> Result<(), ViewError> {
        tracing::info!("{}: {} {}", S::NAME, request.method.as_str(), request.path);

        if let Err(e) = self.client.execute(request).await {
            self.alert = Some(e.message().to_string());
            return Err(e.into());
        }

        // The mutation itself went through; a failed refetch is reported
        // through `error()` like any other load.
        if let Err(e) = self.load().await {
            tracing::warn!("{}: refetch after mutation failed: {}", S::NAME, e);
        }
        Ok(())
    }

    /// Stop accepting load results
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::records::{ContactScreen, ContactStatus, JoinUsScreen};
    use crate::testing::{application, contact, FakeBackend};
    use crate::view::SortSpec;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn decode<S: Screen>(items: Value) -> Vec<S::Record> {
        serde_json::from_value(items).unwrap()
    }

    fn names(projection: &Projection<'_, crate::records::ContactMessage>) -> Vec<String> {
        projection.records().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn stale_response_is_discarded() {
        let backend = FakeBackend::new();
        let mut list = ListController::<ContactScreen>::new(backend);

        let first = list.begin_load();
        let second = list.begin_load();

        let fresh = decode::<ContactScreen>(json!([contact("c2", "Fresh", "pending", "2024-05-02T09:00:00Z")]));
        let old = decode::<ContactScreen>(json!([contact("c1", "Old", "pending", "2024-05-01T09:00:00Z")]));

        // the older request settling first must not clear loading
        assert_eq!(list.complete_load(first, Ok(old.clone())), LoadOutcome::Stale);
        assert!(list.is_loading());
        assert!(list.records().is_empty());

        assert_eq!(list.complete_load(second, Ok(fresh)), LoadOutcome::Applied);
        assert!(!list.is_loading());
        assert_eq!(list.records()[0].id, "c2");

        // and arriving late changes nothing either
        assert_eq!(list.complete_load(first, Ok(old)), LoadOutcome::Stale);
        assert_eq!(list.records()[0].id, "c2");
    }

    #[test]
    fn response_after_unmount_is_dropped() {
        let mut list = ListController::<ContactScreen>::new(FakeBackend::new());
        let ticket = list.begin_load();
        list.unmount();

        let records = decode::<ContactScreen>(json!([contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z")]));
        assert_eq!(list.complete_load(ticket, Ok(records)), LoadOutcome::Unmounted);
        assert!(list.records().is_empty());
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn load_after_unmount_stays_idle() {
        let backend = FakeBackend::new();
        backend.set_collection(
            "/api/contact",
            json!([contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z")]),
        );
        let mut list = ListController::<ContactScreen>::new(backend.clone());
        list.unmount();

        list.load().await.unwrap();
        assert!(!list.is_loading());
        assert!(list.records().is_empty());
        assert!(backend.requests().is_empty());

        let ticket = list.begin_load();
        assert!(!list.is_loading());
        assert_eq!(list.complete_load(ticket, Ok(Vec::new())), LoadOutcome::Unmounted);
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn null_field_in_one_row_does_not_fail_the_screen() {
        let backend = FakeBackend::new();
        backend.set_collection(
            "/api/contact",
            json!([
                contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z"),
                {
                    "_id": "c2",
                    "name": "Bilal",
                    "email": "bilal@example.com",
                    "message": null,
                    "status": null,
                    "createdAt": "2024-05-02T09:00:00Z"
                }
            ]),
        );
        let mut list = ListController::<ContactScreen>::new(backend);

        list.load().await.unwrap();
        assert_eq!(list.error(), None);
        assert_eq!(list.records().len(), 2);
        assert_eq!(list.find("c2").map(|r| r.status), Some(ContactStatus::Pending));
        assert_eq!(list.find("c2").map(|r| r.message.as_str()), Some(""));
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_collection() {
        let backend = FakeBackend::new();
        backend.set_collection(
            "/api/contact",
            json!([contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z")]),
        );
        let mut list = ListController::<ContactScreen>::new(backend.clone());
        list.load().await.unwrap();

        backend.script(
            Method::Get,
            "/api/contact",
            Err(ApiError::Server {
                status: 500,
                message: "Database unavailable".into(),
            }),
        );
        let err = list.load().await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(list.error(), Some("Database unavailable"));
        assert_eq!(list.records().len(), 1);
        assert!(!list.is_loading());

        list.load().await.unwrap();
        assert_eq!(list.error(), None);
    }

    #[tokio::test]
    async fn mutation_reloads_collection() {
        let backend = FakeBackend::new();
        backend.set_collection(
            "/api/contact",
            json!([contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z")]),
        );
        let mut list = ListController::<ContactScreen>::new(backend.clone());
        list.load().await.unwrap();

        backend.set_collection(
            "/api/contact",
            json!([contact("c1", "Asha", "responded", "2024-05-01T09:00:00Z")]),
        );
        list.mutate(
            "c1",
            &crate::records::ContactPatch {
                status: ContactStatus::Resolved,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            backend.request_lines(),
            vec!["GET /api/contact", "PATCH /api/contact/c1", "GET /api/contact"]
        );
        assert_eq!(backend.requests()[1].body, Some(json!({ "status": "responded" })));
        assert_eq!(list.records()[0].status, ContactStatus::Resolved);
        assert_eq!(list.alert(), None);
    }

    #[tokio::test]
    async fn failed_mutation_raises_alert_without_reload() {
        let backend = FakeBackend::new();
        backend.set_collection(
            "/api/contact",
            json!([contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z")]),
        );
        backend.script(
            Method::Patch,
            "/api/contact/c1",
            Err(ApiError::from_status(500, None)),
        );
        let mut list = ListController::<ContactScreen>::new(backend.clone());
        list.load().await.unwrap();

        let err = list
            .mutate(
                "c1",
                &crate::records::ContactPatch {
                    status: ContactStatus::InProgress,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ViewError::Api(_)));
        assert_eq!(list.alert(), Some(crate::error::GENERIC_FAILURE));
        assert_eq!(backend.request_lines(), vec!["GET /api/contact", "PATCH /api/contact/c1"]);
        assert_eq!(list.records()[0].status, ContactStatus::Pending);

        assert!(list.acknowledge_alert().is_some());
        assert_eq!(list.alert(), None);
    }

    #[tokio::test]
    async fn remove_requires_confirmation() {
        let backend = FakeBackend::new();
        backend.set_collection(
            "/api/joinus",
            json!([
                application("a1", "Ravi", false, "2024-05-01T09:00:00Z"),
                application("a2", "Nisha", true, "2024-05-02T09:00:00Z"),
            ]),
        );
        let mut list = ListController::<JoinUsScreen>::new(backend.clone());
        list.load().await.unwrap();

        let outcome = list.remove("a1", |_| false).await.unwrap();
        assert_eq!(outcome, RemoveOutcome::Cancelled);
        assert_eq!(backend.request_lines(), vec!["GET /api/joinus"]);

        backend.set_collection(
            "/api/joinus",
            json!([application("a2", "Nisha", true, "2024-05-02T09:00:00Z")]),
        );
        let outcome = list
            .remove("a1", |record| record.full_name == "Ravi")
            .await
            .unwrap();
        assert_eq!(outcome, RemoveOutcome::Removed);
        assert_eq!(
            backend.request_lines(),
            vec!["GET /api/joinus", "DELETE /api/joinus/a1", "GET /api/joinus"]
        );
        assert_eq!(list.records().len(), 1);
    }

    #[tokio::test]
    async fn remove_is_rejected_where_unsupported() {
        let backend = FakeBackend::new();
        let mut list = ListController::<ContactScreen>::new(backend.clone());
        let err = list.remove("c1", |_| true).await.unwrap_err();
        assert!(matches!(err, ViewError::Unsupported { action: "delete", .. }));
        assert!(backend.requests().is_empty());
    }

    fn loaded(items: Value) -> ListController<ContactScreen> {
        let mut list = ListController::<ContactScreen>::new(FakeBackend::new());
        let ticket = list.begin_load();
        list.complete_load(ticket, Ok(decode::<ContactScreen>(items)));
        list
    }

    #[test]
    fn search_keeps_exactly_the_matches_in_order() {
        let mut list = loaded(json!([
            contact("c1", "Asha", "pending", "2024-05-01T09:00:00Z"),
            contact("c2", "Bharat", "pending", "2024-05-01T10:00:00Z"),
            contact("c3", "Ashwin", "responded", "2024-05-01T11:00:00Z"),
            contact("c4", "Dev", "pending", "2024-05-01T12:00:00Z"),
        ]));

        list.set_search("ASH");
        let view = list.projection().unwrap();
        assert_eq!(view.total_matches, 2);
        assert_eq!(names(&view), vec!["Asha", "Ashwin"]);

        list.set_status_filter(Some(ContactStatus::Resolved));
        assert_eq!(names(&list.projection().unwrap()), vec!["Ashwin"]);
    }

    #[test]
    fn groups_newest_date_first_and_sorts_within() {
        let mut list = loaded(json!([
            contact("c1", "zara", "pending", "2024-05-01T09:00:00Z"),
            contact("c2", "Mohan", "pending", "2024-05-03T09:00:00Z"),
            contact("c3", "arjun", "pending", "2024-05-01T15:00:00Z"),
            contact("c4", "Kiran", "pending", "2024-05-03T08:00:00Z"),
            contact("c5", "Bela", "pending", "2024-05-01T11:00:00Z"),
        ]));
        list.set_sort(Some(SortSpec::asc("NAME"))).unwrap();

        let view = list.projection().unwrap();
        let labels: Vec<&str> = view.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["5/3/2024", "5/1/2024"]);

        let first: Vec<&str> = view.groups[0].records.iter().map(|r| r.name.as_str()).collect();
        let second: Vec<&str> = view.groups[1].records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(first, vec!["Kiran", "Mohan"]);
        assert_eq!(second, vec!["arjun", "Bela", "zara"]);
    }

    #[test]
    fn pagination_over_ten_records() {
        let items: Vec<Value> = (1..=10)
            .map(|i| contact(&format!("c{}", i), &format!("Person {:02}", i), "pending", "2024-05-01T09:00:00Z"))
            .collect();
        let mut list = loaded(Value::Array(items));
        assert_eq!(list.state().page, 1);

        let view = list.projection().unwrap();
        assert_eq!(names(&view), vec!["Person 01", "Person 02", "Person 03", "Person 04"]);
        assert_eq!(view.total_pages, 3);

        list.set_page(3).unwrap();
        assert_eq!(names(&list.projection().unwrap()), vec!["Person 09", "Person 10"]);

        list.set_page(4).unwrap();
        assert!(list.projection().unwrap().is_empty());

        assert!(matches!(list.set_page(0), Err(ViewError::InvalidPage(0))));
    }

    #[test]
    fn changing_filters_returns_to_first_page() {
        let mut list = loaded(json!([]));
        list.set_page(3).unwrap();
        list.set_search("x");
        assert_eq!(list.state().page, 1);

        list.set_page(2).unwrap();
        list.set_status_filter(None);
        assert_eq!(list.state().page, 1);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let mut list = loaded(json!([]));
        assert!(matches!(
            list.set_sort(Some(SortSpec::desc("password"))),
            Err(ViewError::InvalidSortField(_))
        ));
        assert_eq!(list.state().sort, None);
    }
}
