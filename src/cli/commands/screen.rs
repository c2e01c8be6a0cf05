// Shared plumbing for the per-screen commands: guard check, loading,
// list rendering, detail view, edit and delete.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde_json::{json, Value};

use crate::auth::{Claims, Credential};
use crate::cli::config::{credential_store, http_client};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::modal::{EditModal, Editable, ModalError};
use crate::session::{GuardOutcome, Route, RouteGuard};
use crate::view::{ListController, RemoveOutcome, Screen, StatusSet, ViewOrder};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, short, help = "Case-insensitive search across the screen's text fields")]
    pub search: Option<String>,

    #[arg(long, help = "Only show records with this status")]
    pub status: Option<String>,

    #[arg(long, help = "Sort field, e.g. \"name\", \"name desc\" or \"-createdAt\"")]
    pub sort: Option<String>,

    #[arg(long, default_value_t = 1, help = "Page to show, starting at 1")]
    pub page: usize,

    #[arg(long, help = "Rows per page")]
    pub page_size: Option<usize>,
}

/// An admin session that passed the route guard
pub struct AdminSession {
    pub claims: Claims,
    pub credential: Credential,
}

pub fn require_admin(route: Route) -> anyhow::Result<AdminSession> {
    let store = credential_store()?;
    match RouteGuard::new(&store).check(route) {
        GuardOutcome::Render(Some(claims)) => {
            let credential = store.get().context("credential disappeared after guard check")?;
            Ok(AdminSession { claims, credential })
        }
        GuardOutcome::Render(None) => Err(anyhow::anyhow!("{} is not a protected view", route.path())),
        GuardOutcome::Redirect { reason, .. } => {
            tracing::debug!("guard redirected {} to login: {:?}", route.path(), reason);
            Err(anyhow::anyhow!("{} Run 'vts auth login <username>'.", reason.message()))
        }
    }
}

/// Guard, connect and load a screen's collection
pub async fn open<S: Screen>() -> anyhow::Result<ListController<S>> {
    let session = require_admin(S::ROUTE)?;
    tracing::debug!("{} opened by {:?}", S::NAME, session.claims.display_name());

    let client = http_client(Some(session.credential))?;
    let mut list = ListController::<S>::new(Arc::new(client))
        .with_page_size(config().page_size_for(S::PAGE_SIZE));

    if let Err(e) = list.load().await {
        if e.is_auth_failure() {
            // the backend no longer accepts this credential
            credential_store()?.clear()?;
            anyhow::bail!("{} Run 'vts auth login <username>'.", e.message());
        }
        return Err(anyhow::Error::new(e).context(format!("failed to load {}", S::TITLE.to_lowercase())));
    }
    Ok(list)
}

pub fn parse_status<St: StatusSet>(input: &str) -> anyhow::Result<St> {
    St::parse_input(input).ok_or_else(|| {
        let allowed: Vec<&str> = St::ALL.iter().map(|s| s.label()).collect();
        anyhow::anyhow!("Unknown status '{}'. Expected one of: {}", input, allowed.join(", "))
    })
}

pub async fn list<S: Screen>(
    args: ListArgs,
    columns: &[(&str, &str, usize)],
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut list = open::<S>().await?;
    if let Some(size) = args.page_size {
        list = list.with_page_size(size);
    }

    if let Some(query) = &args.search {
        list.set_search(query.as_str());
    }
    if let Some(status) = &args.status {
        list.set_status_filter(Some(parse_status::<S::Status>(status)?));
    }
    if let Some(sort) = &args.sort {
        list.set_sort(Some(ViewOrder::parse(sort, S::SORT_FIELDS)?))?;
    }
    list.set_page(args.page)?;

    let projection = list.projection()?;

    if projection.total_matches == 0 {
        return output_empty_collection(&output_format, S::NAME, &format!("No {} found", S::TITLE.to_lowercase()));
    }

    match output_format {
        OutputFormat::Json => {
            let groups: Vec<Value> = projection
                .groups
                .iter()
                .map(|g| {
                    json!({
                        "label": g.label,
                        "records": g.records.iter().map(|r| record_json::<S>(r)).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "screen": S::NAME,
                    "groups": groups,
                    "page": projection.page,
                    "page_size": projection.page_size,
                    "total_pages": projection.total_pages,
                    "total_matches": projection.total_matches,
                }))?
            );
        }
        OutputFormat::Text => {
            let header: Vec<String> = columns.iter().map(|(_, title, w)| fit(title, *w)).collect();
            println!("{:<26} {}", "ID", header.join(" "));
            println!("{}", "-".repeat(27 + columns.iter().map(|(_, _, w)| w + 1).sum::<usize>()));

            for group in &projection.groups {
                println!("{}", group.label);
                for record in &group.records {
                    let cells: Vec<String> = columns
                        .iter()
                        .map(|(field, _, w)| {
                            let value = if *field == "status" {
                                S::status(record).label().to_string()
                            } else {
                                S::field(record, field).unwrap_or_default()
                            };
                            fit(&value, *w)
                        })
                        .collect();
                    println!("  {:<24} {}", S::id(record), cells.join(" "));
                }
            }

            println!();
            println!(
                "Page {} of {} ({} matching)",
                projection.page,
                projection.total_pages.max(1),
                projection.total_matches
            );
        }
    }

    Ok(())
}

/// Record as JSON with its display status alongside the backend value
fn record_json<S: Screen>(record: &S::Record) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("statusLabel".into(), json!(S::status(record).label()));
    }
    value
}

pub async fn show<S: Screen>(id: &str, fields: &[(&str, &str)], output_format: OutputFormat) -> anyhow::Result<()> {
    let list = open::<S>().await?;
    let record = list
        .find(id)
        .with_context(|| format!("No {} record with id {}", S::NAME, id))?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record_json::<S>(record))?);
        }
        OutputFormat::Text => {
            println!("{}: {}", S::TITLE, S::id(record));
            println!("Status: {}", S::status(record).label());
            for (field, label) in fields {
                if let Some(value) = S::field(record, field).filter(|v| !v.is_empty()) {
                    println!("{}: {}", label, value);
                }
            }
        }
    }
    Ok(())
}

/// Open the edit modal on `id`, apply `change` to its draft and submit
pub async fn edit<S, F>(id: &str, change: F, output_format: OutputFormat) -> anyhow::Result<()>
where
    S: Editable,
    F: FnOnce(&mut S::Form) -> anyhow::Result<()>,
{
    let mut list = open::<S>().await?;
    let mut modal = EditModal::<S>::open_by_id(&list, id)?;
    change(modal.draft_mut())?;

    match modal.submit(&mut list).await {
        Ok(()) => {}
        Err(ModalError::Validation(errors)) => {
            output_field_errors(&output_format, &errors)?;
            anyhow::bail!("{} {} not saved", S::NAME, id);
        }
        Err(e) => return Err(e.into()),
    }

    saved::<S>(&list, id, output_format)
}

/// Send a patch without a form, then report like `edit`
pub async fn apply<S: Screen>(id: &str, patch: S::Patch, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut list = open::<S>().await?;
    if list.find(id).is_none() {
        anyhow::bail!("No {} record with id {}", S::NAME, id);
    }
    list.mutate(id, &patch).await?;
    saved::<S>(&list, id, output_format)
}

fn saved<S: Screen>(list: &ListController<S>, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    if let Some(error) = list.error() {
        tracing::warn!("{} saved but reload failed: {}", S::NAME, error);
    }
    let data = list.find(id).map(|r| json!({ "record": record_json::<S>(r) }));
    output_success(&output_format, &format!("{} {} updated", S::NAME, id), data)
}

pub async fn remove<S: Screen>(id: &str, yes: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut list = open::<S>().await?;
    let outcome = list
        .remove(id, |record| {
            yes || confirm(&format!("Delete {} {} ({})?", S::NAME, S::id(record), S::status(record)))
        })
        .await?;

    match outcome {
        RemoveOutcome::Removed => output_success(
            &output_format,
            &format!("{} {} deleted", S::NAME, id),
            Some(json!({ "id": id })),
        ),
        RemoveOutcome::Cancelled => output_success(&output_format, "Delete cancelled", None),
    }
}
