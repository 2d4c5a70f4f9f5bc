//! Snapshot management module
//!
//! Bindings for the `/snapshots` resource: create, get, update, delete,
//! detailed listing and the reset-status/force-delete admin actions.

pub mod models;
pub mod operations;

pub use models::*;
pub use operations::*;
