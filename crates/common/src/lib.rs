//! Shared types used across the crunch crates.

mod types;

pub use types::{SnapshotId, Value};
