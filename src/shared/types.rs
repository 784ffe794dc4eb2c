//! Shared enum catalog for the Prime SDK.
//!
//! These values travel both in JSON request bodies and in query strings, so each enum
//! serializes to its wire string and also implements `Display` with the same text.

use serde::{Deserialize, Serialize};

/// Implements `as_str` and `Display` from a variant → wire string table.
macro_rules! wire_str {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ============================================================================
// Wallets & balances
// ============================================================================

/// Wallet kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletType {
    #[serde(rename = "VAULT")]
    Vault,
    #[serde(rename = "TRADING")]
    Trading,
    #[serde(rename = "ONCHAIN")]
    Onchain,
    #[serde(rename = "WALLET_TYPE_OTHER")]
    Other,
}

wire_str!(WalletType {
    Vault => "VAULT",
    Trading => "TRADING",
    Onchain => "ONCHAIN",
    Other => "WALLET_TYPE_OTHER",
});

/// Deposit instruction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletDepositType {
    Wire,
    Swift,
    Crypto,
}

wire_str!(WalletDepositType {
    Wire => "WIRE",
    Swift => "SWIFT",
    Crypto => "CRYPTO",
});

/// Portfolio balance view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceType {
    #[serde(rename = "TRADING_BALANCES")]
    Trading,
    #[serde(rename = "VAULT_BALANCES")]
    Vault,
    #[serde(rename = "TOTAL_BALANCES")]
    Total,
    #[serde(rename = "PRIME_CUSTODY_BALANCES")]
    PrimeCustody,
    #[serde(rename = "UNKNOWN_BALANCE_TYPE")]
    Unknown,
}

wire_str!(BalanceType {
    Trading => "TRADING_BALANCES",
    Vault => "VAULT_BALANCES",
    Total => "TOTAL_BALANCES",
    PrimeCustody => "PRIME_CUSTODY_BALANCES",
    Unknown => "UNKNOWN_BALANCE_TYPE",
});

/// Entity balance aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    Total,
    Trading,
    Vault,
}

wire_str!(AggregationType {
    Total => "TOTAL",
    Trading => "TRADING",
    Vault => "VAULT",
});

/// Onchain network family of an address group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    #[default]
    #[serde(rename = "NETWORK_TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "NETWORK_TYPE_EVM")]
    Evm,
    #[serde(rename = "NETWORK_TYPE_SOLANA")]
    Solana,
}

wire_str!(NetworkType {
    Unspecified => "NETWORK_TYPE_UNSPECIFIED",
    Evm => "NETWORK_TYPE_EVM",
    Solana => "NETWORK_TYPE_SOLANA",
});

// ============================================================================
// Orders
// ============================================================================

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

wire_str!(OrderSide {
    Buy => "BUY",
    Sell => "SELL",
});

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    Twap,
    Block,
    Vwap,
    StopLimit,
    Rfq,
}

wire_str!(OrderType {
    Market => "MARKET",
    Limit => "LIMIT",
    Twap => "TWAP",
    Block => "BLOCK",
    Vwap => "VWAP",
    StopLimit => "STOP_LIMIT",
    Rfq => "RFQ",
});

/// Order time in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    GoodUntilDateTime,
    GoodUntilCancelled,
    ImmediateOrCancel,
    FillOrKill,
    UnknownTimeInForce,
}

wire_str!(TimeInForce {
    GoodUntilDateTime => "GOOD_UNTIL_DATE_TIME",
    GoodUntilCancelled => "GOOD_UNTIL_CANCELLED",
    ImmediateOrCancel => "IMMEDIATE_OR_CANCEL",
    FillOrKill => "FILL_OR_KILL",
    UnknownTimeInForce => "UNKNOWN_TIME_IN_FORCE",
});

/// How allocation leg amounts are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeType {
    #[serde(rename = "ALLOCATION_SIZE_TYPE_UNKNOWN")]
    Unknown,
    #[serde(rename = "BASE")]
    Base,
    #[serde(rename = "QUOTE")]
    Quote,
    #[serde(rename = "PERCENT")]
    Percent,
}

wire_str!(SizeType {
    Unknown => "ALLOCATION_SIZE_TYPE_UNKNOWN",
    Base => "BASE",
    Quote => "QUOTE",
    Percent => "PERCENT",
});

// ============================================================================
// Activities & pagination
// ============================================================================

/// Scope filter for entity activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "ACTIVITY_LEVEL_ALL")]
    All,
    #[serde(rename = "ACTIVITY_LEVEL_ENTITY")]
    Entity,
    #[serde(rename = "ACTIVITY_LEVEL_PORTFOLIO")]
    Portfolio,
}

wire_str!(ActivityLevel {
    All => "ACTIVITY_LEVEL_ALL",
    Entity => "ACTIVITY_LEVEL_ENTITY",
    Portfolio => "ACTIVITY_LEVEL_PORTFOLIO",
});

/// Page ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

wire_str!(SortDirection {
    Asc => "ASC",
    Desc => "DESC",
});

/// Cursor pagination parameters shared by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Cursor returned as `next_cursor` by the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl PaginationParams {
    /// Empty pagination (server defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the ordering.
    pub fn with_sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = Some(direction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings_match_serde() {
        assert_eq!(serde_json::to_string(&WalletType::Other).unwrap(), r#""WALLET_TYPE_OTHER""#);
        assert_eq!(serde_json::to_string(&OrderType::StopLimit).unwrap(), r#""STOP_LIMIT""#);
        assert_eq!(
            serde_json::to_string(&TimeInForce::GoodUntilCancelled).unwrap(),
            r#""GOOD_UNTIL_CANCELLED""#
        );
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), r#""ASC""#);
        assert_eq!(BalanceType::PrimeCustody.to_string(), "PRIME_CUSTODY_BALANCES");
        assert_eq!(ActivityLevel::Portfolio.as_str(), "ACTIVITY_LEVEL_PORTFOLIO");
    }

    #[test]
    fn test_enum_deserialize() {
        let side: OrderSide = serde_json::from_str(r#""SELL""#).unwrap();
        assert_eq!(side, OrderSide::Sell);
        let network: NetworkType = serde_json::from_str(r#""NETWORK_TYPE_EVM""#).unwrap();
        assert_eq!(network, NetworkType::Evm);
        assert!(serde_json::from_str::<OrderSide>(r#""sell""#).is_err());
    }

    #[test]
    fn test_pagination_params_builder() {
        let params = PaginationParams::new()
            .with_cursor("abc")
            .with_limit(25)
            .with_sort_direction(SortDirection::Asc);

        assert_eq!(params.cursor.as_deref(), Some("abc"));
        assert_eq!(params.limit, Some(25));
        assert_eq!(params.sort_direction, Some(SortDirection::Asc));
        assert_eq!(
            serde_json::to_value(PaginationParams::new()).unwrap(),
            serde_json::json!({})
        );
    }
}
