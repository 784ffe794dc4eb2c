//! REST API client module for Coinbase Prime.
//!
//! This module provides a signed HTTP client for the Prime REST API with one method per
//! endpoint. Requests are plain structs; responses are hydrated records.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use prime_sdk::api::{ListPortfolioBalancesRequest, PrimeApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads PRIME_CREDENTIALS
//!     let client = PrimeApiClient::from_env()?;
//!     let portfolio_id = client.credentials().portfolio_id().unwrap_or_default().to_string();
//!
//!     let balances = client
//!         .list_portfolio_balances(ListPortfolioBalancesRequest::new(portfolio_id))
//!         .await?;
//!     for balance in balances.records("balances") {
//!         println!("{}: {}", balance.str("symbol").unwrap_or("?"), balance.str("amount").unwrap_or("0"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Client Configuration
//!
//! Use the builder pattern for custom configuration:
//!
//! ```rust,ignore
//! use prime_sdk::api::PrimeApiClient;
//! use prime_sdk::auth::Credentials;
//! use std::time::Duration;
//!
//! let client = PrimeApiClient::builder(Credentials::from_env()?)
//!     .base_url("http://localhost:8080/v1")
//!     .timeout(Duration::from_secs(60))
//!     .header("X-Custom-Header", "value")
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>` which is an alias for `Result<T, ApiError>`:
//!
//! ```rust,ignore
//! use prime_sdk::api::{ApiError, GetOrderRequest};
//!
//! match client.get_order(GetOrderRequest::new("portfolio_id", "order_id")).await {
//!     Ok(order) => println!("{}", order),
//!     Err(ApiError::NotFound(body)) => println!("Order not found: {}", body),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! A status listed through `with_allowed_status_codes` is not an error: its body is hydrated
//! like a 200 response.

pub mod client;
pub mod error;
pub mod models;
pub mod types;

// Re-export main types for convenience
pub use client::{PrimeApiClient, PrimeApiClientBuilder};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use types::*;
