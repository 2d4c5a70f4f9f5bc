//! Shared helpers for HTTP client construction and query assembly

pub mod network;
pub mod query;
