//! manila-client - OpenStack Shared File Systems (Manila) v2 bindings
//!
//! Typed request builders and response parsers for the share network and
//! snapshot resources of the Manila v2 API. Every operation is one HTTP
//! round trip: build an options value, let the client serialize and send it,
//! then extract the typed payload from the returned [`client::ApiResult`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use manila_client::share_network::{ShareNetworkApi, ShareNetworkCreateRequest};
//! use manila_client::ServiceClient;
//!
//! # async fn example() -> manila_client::Result<()> {
//! let client = Arc::new(
//!     ServiceClient::new("https://manila.example.com:8786/v2/my-project")?
//!         .with_token("gAAAAAB..."),
//! );
//! let share_networks = ShareNetworkApi::new(client);
//!
//! let opts = ShareNetworkCreateRequest {
//!     neutron_net_id: Some("998b42ee-2cee-4d36-8b95-67b5ca1f2109".to_string()),
//!     name: Some("my_network".to_string()),
//!     ..Default::default()
//! };
//! let network = share_networks.create(&opts).await.extract()?;
//! println!("created {}", network.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod pagination;
pub mod share_network;
pub mod snapshot;
pub mod utils;

// Re-export commonly used types
pub use client::{ApiResult, ServiceClient};
pub use error::{ManilaError, Result};
