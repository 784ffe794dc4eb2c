//! API request and response types for the Prime REST API.
//!
//! Requests are plain structs: path identifiers and `allowed_status_codes` never reach the
//! request body, unset optional fields are omitted. Responses are hydrated records (see
//! [`crate::hydrate`]) with one schema per endpoint.

pub mod activities;
pub mod address_book;
pub mod allocations;
pub mod entities;
pub mod futures;
pub mod orders;
pub mod portfolios;
pub mod transactions;
pub mod wallets;

// Re-export all types for convenience
pub use activities::*;
pub use address_book::*;
pub use allocations::*;
pub use entities::*;
pub use futures::*;
pub use orders::*;
pub use portfolios::*;
pub use transactions::*;
pub use wallets::*;

/// Adds `with_allowed_status_codes` to request types.
macro_rules! allowed_status_codes {
    ($($request:ty),+ $(,)?) => {
        $(
            impl $request {
                /// Treat these non-2xx statuses as successful responses and hydrate their bodies.
                pub fn with_allowed_status_codes(
                    mut self,
                    codes: impl IntoIterator<Item = u16>,
                ) -> Self {
                    self.allowed_status_codes = codes.into_iter().collect();
                    self
                }
            }
        )+
    };
}

pub(crate) use allowed_status_codes;
