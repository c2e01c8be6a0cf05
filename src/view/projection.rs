// Derived, read-only projection of a fetched collection:
// search -> status filter -> sort -> group by creation date -> paginate

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use super::error::ViewError;
use super::screen::Screen;
use super::types::{SortDirection, ViewState};
use super::view_order::ViewOrder;

pub const UNDATED_LABEL: &str = "Unknown date";

#[derive(Debug, Clone, Serialize)]
pub struct Group<'a, R> {
    /// Locale date string, `M/D/YYYY`
    pub label: String,
    pub date: Option<NaiveDate>,
    pub records: Vec<&'a R>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection<'a, R> {
    pub groups: Vec<Group<'a, R>>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl<'a, R> Projection<'a, R> {
    /// Records on this page in display order
    pub fn records(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.groups.iter().flat_map(|g| g.records.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn format_group_label(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => UNDATED_LABEL.to_string(),
    }
}

/// Records matching the search query and status filter, in original order.
pub fn filter_records<'a, S: Screen>(
    records: &'a [S::Record],
    state: &ViewState<S::Status>,
) -> Vec<&'a S::Record> {
    let needle = state.search.trim().to_lowercase();

    records
        .iter()
        .filter(|r| state.status.map_or(true, |s| S::status(*r) == s))
        .filter(|r| {
            needle.is_empty()
                || S::SEARCH_FIELDS.iter().any(|f| {
                    S::field(*r, f).is_some_and(|v| v.to_lowercase().contains(&needle))
                })
        })
        .collect()
}

/// Stable, case-insensitive sort on the state's sort field. Missing values
/// sort as the empty string.
pub fn sort_records<S: Screen>(
    records: &mut [&S::Record],
    state: &ViewState<S::Status>,
) -> Result<(), ViewError> {
    let Some(spec) = &state.sort else {
        return Ok(());
    };
    let field = ViewOrder::resolve(&spec.field, S::SORT_FIELDS)?;

    let key = |r: &S::Record| S::field(r, field).unwrap_or_default().to_lowercase();
    records.sort_by(|a, b| {
        let ord: Ordering = key(*a).cmp(&key(*b));
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    Ok(())
}

pub fn project<'a, S: Screen>(
    records: &'a [S::Record],
    state: &ViewState<S::Status>,
    page_size: usize,
    offset: FixedOffset,
) -> Result<Projection<'a, S::Record>, ViewError> {
    if state.page == 0 {
        return Err(ViewError::InvalidPage(state.page));
    }
    let page_size = page_size.max(1);

    let mut matches = filter_records::<S>(records, state);
    sort_records::<S>(&mut matches, state)?;

    let date_of = |r: &S::Record| S::created_at(r).map(|t| t.with_timezone(&offset).date_naive());

    // Newest date first, undated last; insertion order kept inside a bucket
    let mut buckets: BTreeMap<Reverse<Option<NaiveDate>>, Vec<&'a S::Record>> = BTreeMap::new();
    for record in matches {
        buckets.entry(Reverse(date_of(record))).or_default().push(record);
    }
    let ordered: Vec<(Option<NaiveDate>, &'a S::Record)> = buckets
        .into_iter()
        .flat_map(|(Reverse(date), rs)| rs.into_iter().map(move |r| (date, r)))
        .collect();

    let total_matches = ordered.len();
    let total_pages = total_matches.div_ceil(page_size);
    let start = (state.page - 1).saturating_mul(page_size);

    let mut groups: Vec<Group<'a, S::Record>> = Vec::new();
    for (date, record) in ordered.into_iter().skip(start).take(page_size) {
        match groups.last_mut() {
            Some(group) if group.date == date => group.records.push(record),
            _ => groups.push(Group {
                label: format_group_label(date),
                date,
                records: vec![record],
            }),
        }
    }

    Ok(Projection {
        groups,
        page: state.page,
        page_size,
        total_pages,
        total_matches,
    })
}
