//! Share network operations
//!
//! Each call performs a single request/response round trip against the
//! `/share-networks` resource and packs the outcome into an [`ApiResult`];
//! the caller extracts the typed payload (or the error) from there.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use super::models::{SecurityServiceAssociation, ShareNetwork};
use crate::client::{ApiResult, ServiceClient, ToQueryParams, ToRequestBody};
use crate::error::Result;
use crate::pagination::Pager;

const RESOURCE: &str = "share-networks";

const ADD_SECURITY_SERVICE_ENVELOPE: &str = "add_security_service";
const REMOVE_SECURITY_SERVICE_ENVELOPE: &str = "remove_security_service";

/// Share network API bound to one service client.
#[derive(Clone)]
pub struct ShareNetworkApi {
    client: Arc<ServiceClient>,
}

impl ShareNetworkApi {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Create a share network. Extract the created [`ShareNetwork`] from the
    /// returned result.
    pub async fn create(&self, opts: &impl ToRequestBody) -> ApiResult<ShareNetwork> {
        let body = match opts.to_request_body() {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.client
            .issue(Method::POST, &[RESOURCE], Some(body), &[200, 202])
            .await
    }

    /// Retrieve a single share network by id.
    pub async fn get(&self, id: &str) -> ApiResult<ShareNetwork> {
        self.client
            .issue(Method::GET, &[RESOURCE, id], None, &[200])
            .await
    }

    /// Update a share network with the provided partial fields.
    pub async fn update(&self, id: &str, opts: &impl ToRequestBody) -> ApiResult<ShareNetwork> {
        let body = match opts.to_request_body() {
            Ok(body) => body,
            Err(err) => return err.into(),
        };
        self.client
            .issue(Method::PUT, &[RESOURCE, id], Some(body), &[200])
            .await
    }

    /// Delete a share network. The result carries no body; check it with
    /// [`ApiResult::check`].
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .issue(Method::DELETE, &[RESOURCE, id], None, &[200, 202, 204])
            .await
    }

    /// List share networks in detail, page by page. The pager fetches lazily
    /// as it is consumed.
    pub fn list_detail(&self, filter: &impl ToQueryParams) -> Result<Pager<ShareNetwork>> {
        let params = filter.to_query_params()?;
        let mut url = self.client.resource_url(&[RESOURCE, "detail"])?;
        if !params.is_empty() {
            params.apply_to(&mut url);
        }
        Ok(Pager::new(Arc::clone(&self.client), url))
    }

    /// Associate a security service with a share network. The response
    /// carries the updated share network.
    pub async fn add_security_service(
        &self,
        id: &str,
        opts: &SecurityServiceAssociation,
    ) -> ApiResult<ShareNetwork> {
        self.security_service_action(id, ADD_SECURITY_SERVICE_ENVELOPE, opts)
            .await
    }

    /// Dissociate a security service from a share network.
    pub async fn remove_security_service(
        &self,
        id: &str,
        opts: &SecurityServiceAssociation,
    ) -> ApiResult<ShareNetwork> {
        self.security_service_action(id, REMOVE_SECURITY_SERVICE_ENVELOPE, opts)
            .await
    }

    async fn security_service_action(
        &self,
        id: &str,
        envelope: &str,
        opts: &SecurityServiceAssociation,
    ) -> ApiResult<ShareNetwork> {
        let body = match serde_json::to_value(opts) {
            Ok(value) => json!({ envelope: value }),
            Err(err) => return ApiResult::from_error(err.into()),
        };
        self.client
            .issue(Method::POST, &[RESOURCE, id, "action"], Some(body), &[200])
            .await
    }
}
