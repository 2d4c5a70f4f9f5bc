//! Share network management module
//!
//! Bindings for the `/share-networks` resource: create, get, update, delete,
//! detailed listing and the security service attach/detach actions.

pub mod models;
pub mod operations;

pub use models::*;
pub use operations::*;
