//! Persistence: point-in-time snapshots, rollback/checkout, archive files.
//!
//! # Invariants
//! - A snapshot holds its own deep copy of every entry; the live state never
//!   aliases snapshot storage, in either direction.
//! - Snapshots are immutable after capture, except that `purge` removes a key
//!   from all of them.
//! - Snapshot ids are unique within a store's history.

pub mod archive;
mod config;
pub mod snapshot;
pub mod store;

pub use config::{EmptyAggregate, StoreConfig};
pub use snapshot::Snapshot;
pub use store::{Store, StoreError};
