pub mod bootstrap;
pub mod guard;
pub mod store;

pub use bootstrap::{consume_entry_token, Bootstrap};
pub use guard::{DenyReason, GuardOutcome, Route, RouteGuard};
pub use store::{CredentialSlot, CredentialStore, FileSlot, MemorySlot, Scope, StoreError};
