pub mod controller;
pub mod error;
pub mod projection;
pub mod screen;
pub mod types;
pub mod view_order;

pub use controller::{ListController, LoadOutcome, LoadTicket, RemoveOutcome};
pub use error::ViewError;
pub use projection::{filter_records, project, Group, Projection};
pub use screen::{Screen, StatusSet};
pub use types::{SortDirection, SortSpec, ViewState};
pub use view_order::ViewOrder;
