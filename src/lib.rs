//! # Coinbase Prime Rust SDK
//!
//! A Rust SDK for the Coinbase Prime REST API.
//!
//! ## Modules
//!
//! - [`api`]: Signed REST client with one method per Prime endpoint
//! - [`hydrate`]: Schema-driven conversion of JSON bodies into typed records
//! - [`auth`]: Credentials and request signing
//!
//! Plus shared modules:
//! - [`shared`]: Enum catalog, pagination and query string helpers
//! - [`network`]: API URL constants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prime_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // PRIME_CREDENTIALS holds {"accessKey", "passphrase", "signingKey", "portfolioId", ...}
//!     let client = PrimeApiClient::from_env()?;
//!
//!     let portfolios = client.list_portfolios(ListPortfoliosRequest::new()).await?;
//!     for portfolio in portfolios.records("portfolios") {
//!         println!("{} {}", portfolio.str("id").unwrap_or_default(), portfolio.str("name").unwrap_or_default());
//!     }
//!
//!     let order = client
//!         .create_order(
//!             CreateOrderRequest::new("portfolio_id", "BTC-USD", OrderSide::Buy, OrderType::Market)
//!                 .with_quote_value("100"),
//!         )
//!         .await?;
//!     println!("Order id: {:?}", order.str("order_id"));
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Response hydration: schemas and records.
pub mod hydrate;

/// Shared utilities and types.
/// Used across all SDK modules.
pub mod shared;

/// Network URL constants.
pub mod network;

/// Credentials loading and request signing.
pub mod auth;

/// REST API client module.
pub mod api;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use prime_sdk::prelude::*;
/// ```
pub mod prelude {
    // Client, errors and every request/response type
    pub use crate::api::*;

    // Hydration
    pub use crate::hydrate::{hydrate, FieldType, FieldValue, HydratedResponse, Record, Schema};

    // Credentials
    pub use crate::auth::{Credentials, CredentialsError, CredentialsResult};

    // Network constants
    pub use crate::network::DEFAULT_API_URL;

    // Shared enums and pagination
    pub use crate::shared::types::*;
}
