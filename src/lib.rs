//! modbook library crate.
//!
//! The primary interface is the `modbook` binary. This lib.rs exposes the
//! command layer so that integration tests can run edits against an
//! in-memory or on-disk address book without going through the CLI.
//!
//! The pure domain logic (records, role edits, merge, diff) lives in
//! the `modbook-core` crate.

pub mod config;
pub mod edit;
pub mod error;
pub mod format;
pub mod store;
pub mod telemetry;

pub use edit::{CommandResult, EditCommand, Index};
pub use error::EditError;
pub use store::{AddressBook, NameFilter, StoreError};
