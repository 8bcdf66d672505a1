//! Client for the FatSecret Platform REST API
//!
//! This crate signs requests with two-legged OAuth 1.0a (HMAC-SHA1) and
//! wraps the food and recipe methods of the `server.api` endpoint.
//!
//! # Features
//!
//! - **Environment-based configuration**: credentials and options from `FATSECRET_*` variables
//! - **Per-call signing**: fresh nonce and timestamp on every request
//! - **Pluggable transport**: any [`Transport`] can replace the default `reqwest` one
//! - **Serving normalization**: nutrients per metric unit from `food.get` servings
//!
//! # Example
//!
//! ```rust,no_run
//! use fatsecret_api_client::{FatSecretClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FatSecretClient::new()?;
//!
//!     let results = client.foods().search(&SearchQuery::new("banana")).await?;
//!     println!("{results}");
//!
//!     for unit in client.foods().measurements(33691).await? {
//!         println!("{unit}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod oauth;
pub mod params;
pub mod request;
pub mod servings;
pub mod transport;

pub use client::FatSecretClient;
pub use config::{ClientConfig, Credentials, ResponseFormat};
pub use error::{ApiError, ApiResult};
pub use oauth::{Clock, NonceSource, SignatureEngine};
pub use params::ParameterStore;
pub use request::{ApiMethod, ApiRequest, Resource, SearchQuery};
pub use servings::{ServingRecord, ServingTable};
pub use transport::{ReqwestTransport, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::FatSecretClient;
    pub use crate::config::{ClientConfig, ResponseFormat};
    pub use crate::endpoints::{FoodsApi, RecipesApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::request::{ApiRequest, Resource, SearchQuery};
    pub use crate::servings::{ServingRecord, ServingTable};
}
