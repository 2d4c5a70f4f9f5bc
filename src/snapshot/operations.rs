//! Snapshot operations
//!
//! Single round trip per call against the `/snapshots` resource. The action
//! endpoints (reset status, force delete) return body-less results that are
//! checked rather than extracted.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use super::models::Snapshot;
use crate::client::{ApiResult, ServiceClient, ToQueryParams, ToRequestBody};
use crate::error::Result;
use crate::pagination::Pager;

const RESOURCE: &str = "snapshots";

/// Snapshot API bound to one service client.
#[derive(Clone)]
pub struct SnapshotApi {
    client: Arc<ServiceClient>,
}

impl SnapshotApi {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Create a snapshot of a share. Fails locally, before any request, when
    /// the options are missing the source share id.
    pub async fn create(&self, opts: &impl ToRequestBody) -> ApiResult<Snapshot> {
        let body = match opts.to_request_body() {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.client
            .issue(Method::POST, &[RESOURCE], Some(body), &[200, 201, 202])
            .await
    }

    /// Retrieve a single snapshot by id.
    pub async fn get(&self, id: &str) -> ApiResult<Snapshot> {
        self.client
            .issue(Method::GET, &[RESOURCE, id], None, &[200])
            .await
    }

    /// Update a snapshot with the provided partial fields.
    pub async fn update(&self, id: &str, opts: &impl ToRequestBody) -> ApiResult<Snapshot> {
        let body = match opts.to_request_body() {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.client
            .issue(Method::PUT, &[RESOURCE, id], Some(body), &[200])
            .await
    }

    /// Delete a snapshot. The result carries no body; check it with
    /// [`ApiResult::check`].
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .issue(Method::DELETE, &[RESOURCE, id], None, &[200, 202, 204])
            .await
    }

    /// List snapshots in detail, page by page. The pager fetches lazily as
    /// it is consumed.
    pub fn list_detail(&self, filter: &impl ToQueryParams) -> Result<Pager<Snapshot>> {
        let params = filter.to_query_params()?;
        let mut url = self.client.resource_url(&[RESOURCE, "detail"])?;
        if !params.is_empty() {
            params.apply_to(&mut url);
        }
        Ok(Pager::new(Arc::clone(&self.client), url))
    }

    /// Reset a snapshot to an explicit status (admin action).
    pub async fn reset_status(&self, id: &str, opts: &impl ToRequestBody) -> ApiResult<()> {
        let body = match opts.to_request_body() {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.client
            .issue(Method::POST, &[RESOURCE, id, "action"], Some(body), &[202])
            .await
    }

    /// Delete a snapshot regardless of its state (admin action). Always
    /// sends the literal `{"force_delete": null}` body.
    pub async fn force_delete(&self, id: &str) -> ApiResult<()> {
        let body = json!({ "force_delete": null });
        self.client
            .issue(Method::POST, &[RESOURCE, id, "action"], Some(body), &[202])
            .await
    }
}
