//! Network URL constants for the Prime SDK.

/// Default REST API base URL for Coinbase Prime.
pub const DEFAULT_API_URL: &str = "https://api.prime.coinbase.com/v1";
