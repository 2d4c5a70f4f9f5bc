//! Share network data models
//!
//! Request shapes serialize under the `share_network` envelope with the exact
//! wire field names the v2 API expects; unset optional fields are omitted
//! from the body entirely.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{Extractable, ToQueryParams, ToRequestBody};
use crate::error::Result;
use crate::pagination::Pageable;
use crate::utils::query::QueryParams;

pub(crate) const SHARE_NETWORK_ENVELOPE: &str = "share_network";

/// IP version of a share network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "4"),
            IpVersion::V6 => write!(f, "6"),
        }
    }
}

/// Options for creating a share network. Every field is optional at this
/// layer; the server owns the cross-field invariants.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShareNetworkCreateRequest {
    /// UUID of the Neutron network to set up for share servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutron_net_id: Option<String>,
    /// UUID of the Neutron subnet to set up for share servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutron_subnet_id: Option<String>,
    /// UUID of the Nova network to set up for share servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nova_net_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToRequestBody for ShareNetworkCreateRequest {
    fn to_request_body(&self) -> Result<serde_json::Value> {
        Ok(json!({ SHARE_NETWORK_ENVELOPE: serde_json::to_value(self)? }))
    }
}

/// Options for updating a share network. All fields are partial: `None` is
/// omitted from the wire body, while `Some("")` is an explicit clear sent as
/// an empty string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShareNetworkUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutron_net_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutron_subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nova_net_id: Option<String>,
}

impl ToRequestBody for ShareNetworkUpdateRequest {
    fn to_request_body(&self) -> Result<serde_json::Value> {
        Ok(json!({ SHARE_NETWORK_ENVELOPE: serde_json::to_value(self)? }))
    }
}

/// Filters for the detailed share network listing. Unset fields are left out
/// of the query string.
#[derive(Debug, Clone, Default)]
pub struct ShareNetworkListFilter {
    /// Admin-only. List share networks of all tenants.
    pub all_tenants: bool,
    pub project_id: Option<String>,
    pub neutron_net_id: Option<String>,
    pub neutron_subnet_id: Option<String>,
    pub nova_net_id: Option<String>,
    /// VLAN, VXLAN, GRE or flat
    pub network_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip_version: Option<IpVersion>,
    pub segmentation_id: Option<i32>,
    /// Only share networks created after this date
    pub created_since: Option<String>,
    /// Only share networks created before this date
    pub created_before: Option<String>,
    /// Page size
    pub limit: Option<i32>,
    /// Start point within the listing
    pub offset: Option<i32>,
}

impl ToQueryParams for ShareNetworkListFilter {
    fn to_query_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        params.push_flag("all_tenants", self.all_tenants);
        params.push_opt("project_id", self.project_id.as_ref());
        params.push_opt("neutron_net_id", self.neutron_net_id.as_ref());
        params.push_opt("neutron_subnet_id", self.neutron_subnet_id.as_ref());
        params.push_opt("nova_net_id", self.nova_net_id.as_ref());
        params.push_opt("network_type", self.network_type.as_ref());
        params.push_opt("name", self.name.as_ref());
        params.push_opt("description", self.description.as_ref());
        params.push_opt("ip_version", self.ip_version.as_ref());
        params.push_opt("segmentation_id", self.segmentation_id.as_ref());
        params.push_opt("created_since", self.created_since.as_ref());
        params.push_opt("created_before", self.created_before.as_ref());
        params.push_opt("limit", self.limit.as_ref());
        params.push_opt("offset", self.offset.as_ref());
        Ok(params)
    }
}

/// Identifier carried by the add/remove security service actions. The same
/// shape serves both; only the action envelope differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityServiceAssociation {
    pub security_service_id: String,
}

impl SecurityServiceAssociation {
    pub fn new<S: Into<String>>(security_service_id: S) -> Self {
        Self {
            security_service_id: security_service_id.into(),
        }
    }
}

/// A share network as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareNetwork {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub neutron_net_id: Option<String>,
    #[serde(default)]
    pub neutron_subnet_id: Option<String>,
    #[serde(default)]
    pub nova_net_id: Option<String>,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub segmentation_id: Option<i32>,
    #[serde(default)]
    pub cidr: Option<String>,
    #[serde(default)]
    pub ip_version: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Extractable for ShareNetwork {
    const ROOT_KEY: &'static str = "share_network";
}

impl Pageable for ShareNetwork {
    const COLLECTION_KEY: &'static str = "share_networks";

    fn marker(&self) -> &str {
        &self.id
    }
}
