//! Snapshot data models
//!
//! Create accepts both the modern `name`/`description` fields and the legacy
//! `display_name`/`display_description` aliases inherited from the block
//! storage API; update accepts only the legacy pair. That asymmetry is the
//! server's contract, not an oversight.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{Extractable, ToQueryParams, ToRequestBody};
use crate::error::{ManilaError, Result};
use crate::pagination::Pageable;
use crate::utils::query::QueryParams;

pub(crate) const SNAPSHOT_ENVELOPE: &str = "snapshot";

/// Options for creating a snapshot. `share_id` is the one field this layer
/// requires; leaving it empty fails before any request is made.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotCreateRequest {
    /// UUID of the share to snapshot
    pub share_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Legacy alias for `name`; the API accepts both, independently
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Legacy alias for `description`; the API accepts both, independently
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
}

impl ToRequestBody for SnapshotCreateRequest {
    fn to_request_body(&self) -> Result<serde_json::Value> {
        if self.share_id.is_empty() {
            return Err(ManilaError::validation(
                "share_id is required to create a snapshot",
            ));
        }
        Ok(json!({ SNAPSHOT_ENVELOPE: serde_json::to_value(self)? }))
    }
}

/// Options for updating a snapshot. The update endpoint knows only the
/// legacy field names; `None` is omitted from the wire body, `Some("")` is an
/// explicit clear.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
}

impl ToRequestBody for SnapshotUpdateRequest {
    fn to_request_body(&self) -> Result<serde_json::Value> {
        Ok(json!({ SNAPSHOT_ENVELOPE: serde_json::to_value(self)? }))
    }
}

/// Snapshot states accepted by the reset-status action. Whether a reset to a
/// given state is semantically valid is the server's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    Available,
    Error,
    Creating,
    Deleting,
    ManageStarting,
    ManageError,
    UnmanageStarting,
    UnmanageError,
    ErrorDeleting,
}

impl fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SnapshotStatus::Available => "available",
            SnapshotStatus::Error => "error",
            SnapshotStatus::Creating => "creating",
            SnapshotStatus::Deleting => "deleting",
            SnapshotStatus::ManageStarting => "manage_starting",
            SnapshotStatus::ManageError => "manage_error",
            SnapshotStatus::UnmanageStarting => "unmanage_starting",
            SnapshotStatus::UnmanageError => "unmanage_error",
            SnapshotStatus::ErrorDeleting => "error_deleting",
        };
        write!(f, "{}", s)
    }
}

/// Body of the reset-status action.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResetStatusRequest {
    pub status: SnapshotStatus,
}

impl SnapshotResetStatusRequest {
    pub fn new(status: SnapshotStatus) -> Self {
        Self { status }
    }
}

impl ToRequestBody for SnapshotResetStatusRequest {
    fn to_request_body(&self) -> Result<serde_json::Value> {
        Ok(json!({ "reset_status": serde_json::to_value(self)? }))
    }
}

/// Filters for the detailed snapshot listing. The pattern fields match by
/// substring/wildcard and serialize under the `~`-suffixed query keys.
#[derive(Debug, Clone, Default)]
pub struct SnapshotListFilter {
    /// Admin-only. List snapshots of all tenants.
    pub all_tenants: bool,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Share the snapshots were created from
    pub share_id: Option<String>,
    /// Snapshot size in GB
    pub size: Option<i64>,
    pub status: Option<SnapshotStatus>,
    /// Page size
    pub limit: Option<i32>,
    /// Start point within the listing
    pub offset: Option<i32>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
    pub project_id: Option<String>,
    /// Pattern match on name, query key `name~`
    pub name_pattern: Option<String>,
    /// Pattern match on description, query key `description~`
    pub description_pattern: Option<String>,
}

impl ToQueryParams for SnapshotListFilter {
    fn to_query_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        params.push_flag("all_tenants", self.all_tenants);
        params.push_opt("name", self.name.as_ref());
        params.push_opt("description", self.description.as_ref());
        params.push_opt("share_id", self.share_id.as_ref());
        params.push_opt("size", self.size.as_ref());
        params.push_opt("status", self.status.as_ref());
        params.push_opt("limit", self.limit.as_ref());
        params.push_opt("offset", self.offset.as_ref());
        params.push_opt("sort_key", self.sort_key.as_ref());
        params.push_opt("sort_dir", self.sort_dir.as_ref());
        params.push_opt("project_id", self.project_id.as_ref());
        params.push_opt("name~", self.name_pattern.as_ref());
        params.push_opt("description~", self.description_pattern.as_ref());
        Ok(params)
    }
}

/// A snapshot as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    #[serde(default)]
    pub share_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Protocol of the source share
    #[serde(default)]
    pub share_proto: Option<String>,
    /// Size of the source share in GB
    #[serde(default)]
    pub share_size: Option<i64>,
    /// Snapshot size in GB
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Extractable for Snapshot {
    const ROOT_KEY: &'static str = "snapshot";
}

impl Pageable for Snapshot {
    const COLLECTION_KEY: &'static str = "snapshots";

    fn marker(&self) -> &str {
        &self.id
    }
}
