//! Output Generation
//!
//! Read-only session snapshots and rehydration from them.

pub mod snapshot;

pub use snapshot::*;
