//! Kernel: the live entry state and every operation on integer sequences.
//!
//! # Invariants
//! - A key appears at most once in [`Entries`].
//! - Values never leave an [`Entry`] by reference; accessors hand out copies.
//! - Set-algebra functions are pure: they read entries and return new sequences.

pub mod algebra;
pub mod entries;
pub mod entry;

pub use entries::Entries;
pub use entry::{Entry, EntryError};
