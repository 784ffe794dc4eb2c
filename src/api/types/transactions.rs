//! Transaction, transfer and withdrawal types for the Prime REST API.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{PaginationParams, QueryParams};

lazy_static! {
    static ref GET_TRANSACTION: Schema = Schema::builder("GetTransactionResponse")
        .structured("transaction", &TRANSACTION)
        .build();
    static ref LIST_TRANSACTIONS: Schema = Schema::builder("ListTransactionsResponse")
        .list_of_structured("transactions", &TRANSACTION)
        .structured("pagination", &PAGINATION)
        .build();
    static ref CREATE_TRANSFER: Schema = Schema::builder("CreateTransferResponse")
        .primitives(&[
            "activity_id",
            "approval_url",
            "symbol",
            "amount",
            "fee",
            "destination_address",
            "destination_type",
            "source_address",
            "source_type",
            "transaction_id",
        ])
        .build();
    static ref CREATE_WITHDRAWAL: Schema = Schema::builder("CreateWithdrawalResponse")
        .primitives(&[
            "activity_id",
            "approval_url",
            "symbol",
            "amount",
            "fee",
            "destination_type",
            "source_type",
        ])
        .structured("blockchain_destination", &BLOCKCHAIN)
        .structured("blockchain_source", &BLOCKCHAIN)
        .primitive("transaction_id")
        .build();
    static ref CREATE_CONVERSION: Schema = Schema::builder("CreateConversionResponse")
        .primitives(&[
            "activity_id",
            "source_symbol",
            "destination_symbol",
            "amount",
            "destination",
            "source",
        ])
        .build();
}

hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/transactions/{transaction_id}.
    GetTransactionResponse => GET_TRANSACTION
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/transactions.
    ListPortfolioTransactionsResponse => LIST_TRANSACTIONS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/transactions.
    ListWalletTransactionsResponse => LIST_TRANSACTIONS
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/transfers.
    CreateTransferResponse => CREATE_TRANSFER
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/withdrawals.
    CreateWithdrawalResponse => CREATE_WITHDRAWAL
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/conversion.
    CreateConversionResponse => CREATE_CONVERSION
}

/// Request for GET /portfolios/{portfolio_id}/transactions/{transaction_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTransactionRequest {
    pub portfolio_id: String,
    pub transaction_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetTransactionRequest {
    pub fn new(portfolio_id: impl Into<String>, transaction_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            transaction_id: transaction_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPortfolioTransactionsRequest {
    pub portfolio_id: String,
    pub symbols: Vec<String>,
    /// Transaction types such as `DEPOSIT` or `WITHDRAWAL`
    pub types: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListPortfolioTransactionsRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time_range(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.start_time = Some(start);
        self.end_time = end;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("symbols", &self.symbols)
            .list("types", &self.types)
            .datetime("start_time", self.start_time.as_ref())
            .datetime("end_time", self.end_time.as_ref())
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListWalletTransactionsRequest {
    pub portfolio_id: String,
    pub wallet_id: String,
    pub types: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListWalletTransactionsRequest {
    pub fn new(portfolio_id: impl Into<String>, wallet_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            ..Default::default()
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time_range(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.start_time = Some(start);
        self.end_time = end;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("types", &self.types)
            .datetime("start_time", self.start_time.as_ref())
            .datetime("end_time", self.end_time.as_ref())
            .pagination(self.pagination.as_ref())
    }
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/transfers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTransferRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub amount: String,
    /// Destination wallet id
    pub destination: String,
    pub idempotency_key: String,
    pub currency_symbol: String,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateTransferRequest {
    /// Create a transfer with a fresh random idempotency key.
    pub fn new(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        destination: impl Into<String>,
        amount: impl Into<String>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            amount: amount.into(),
            destination: destination.into(),
            idempotency_key: uuid::Uuid::new_v4().to_string(),
            currency_symbol: currency_symbol.into(),
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = key.into();
        self
    }
}

/// Fiat withdrawal target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    pub payment_method_id: String,
}

/// Crypto withdrawal target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockchainAddress {
    pub address: String,
    /// Memo or destination tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_identifier: Option<String>,
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/withdrawals.
///
/// Exactly one of `payment_method` and `blockchain_address` should be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateWithdrawalRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub amount: String,
    /// `DESTINATION_PAYMENT_METHOD` or `DESTINATION_BLOCKCHAIN`
    pub destination_type: String,
    pub idempotency_key: String,
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_address: Option<BlockchainAddress>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateWithdrawalRequest {
    fn base(
        portfolio_id: String,
        wallet_id: String,
        amount: String,
        currency_symbol: String,
        destination_type: &str,
    ) -> Self {
        Self {
            portfolio_id,
            wallet_id,
            amount,
            destination_type: destination_type.to_string(),
            idempotency_key: uuid::Uuid::new_v4().to_string(),
            currency_symbol,
            ..Default::default()
        }
    }

    /// Withdraw to a blockchain address.
    pub fn to_blockchain(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        amount: impl Into<String>,
        currency_symbol: impl Into<String>,
        address: BlockchainAddress,
    ) -> Self {
        let mut request = Self::base(
            portfolio_id.into(),
            wallet_id.into(),
            amount.into(),
            currency_symbol.into(),
            "DESTINATION_BLOCKCHAIN",
        );
        request.blockchain_address = Some(address);
        request
    }

    /// Withdraw to a registered payment method.
    pub fn to_payment_method(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        amount: impl Into<String>,
        currency_symbol: impl Into<String>,
        payment_method_id: impl Into<String>,
    ) -> Self {
        let mut request = Self::base(
            portfolio_id.into(),
            wallet_id.into(),
            amount.into(),
            currency_symbol.into(),
            "DESTINATION_PAYMENT_METHOD",
        );
        request.payment_method = Some(PaymentMethod {
            payment_method_id: payment_method_id.into(),
        });
        request
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = key.into();
        self
    }
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/conversion.
///
/// Converts between a stablecoin and its fiat counterpart (e.g. USDC to USD).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateConversionRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub amount: String,
    /// Destination wallet id
    pub destination: String,
    pub idempotency_key: String,
    pub source_symbol: String,
    pub destination_symbol: String,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateConversionRequest {
    /// Create a conversion with a fresh random idempotency key.
    pub fn new(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        destination: impl Into<String>,
        amount: impl Into<String>,
        source_symbol: impl Into<String>,
        destination_symbol: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            amount: amount.into(),
            destination: destination.into(),
            idempotency_key: uuid::Uuid::new_v4().to_string(),
            source_symbol: source_symbol.into(),
            destination_symbol: destination_symbol.into(),
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = key.into();
        self
    }
}

allowed_status_codes!(
    GetTransactionRequest,
    ListPortfolioTransactionsRequest,
    ListWalletTransactionsRequest,
    CreateTransferRequest,
    CreateWithdrawalRequest,
    CreateConversionRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_list_portfolio_transactions_query() {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap();
        let request = ListPortfolioTransactionsRequest::new("p1")
            .with_symbols(["USDC"])
            .with_types(["DEPOSIT", "WITHDRAWAL"])
            .with_time_range(start, Some(end));

        let query = request.query();
        let keys: Vec<&str> = query.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["symbols", "types", "types", "start_time", "end_time"]
        );
    }

    #[test]
    fn test_transfer_body() {
        let request = CreateTransferRequest::new("p1", "w1", "w2", "100", "USDC")
            .with_idempotency_key("k-1");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": "100",
                "destination": "w2",
                "idempotency_key": "k-1",
                "currency_symbol": "USDC"
            })
        );
    }

    #[test]
    fn test_blockchain_withdrawal_body() {
        let request = CreateWithdrawalRequest::to_blockchain(
            "p1",
            "w1",
            "0.1",
            "BTC",
            BlockchainAddress {
                address: "bc1q".to_string(),
                account_identifier: None,
            },
        )
        .with_idempotency_key("k-2");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": "0.1",
                "destination_type": "DESTINATION_BLOCKCHAIN",
                "idempotency_key": "k-2",
                "currency_symbol": "BTC",
                "blockchain_address": {"address": "bc1q"}
            })
        );
    }

    #[test]
    fn test_payment_method_withdrawal() {
        let request = CreateWithdrawalRequest::to_payment_method("p1", "w1", "500", "USD", "pm-1");
        assert_eq!(request.destination_type, "DESTINATION_PAYMENT_METHOD");
        assert!(request.blockchain_address.is_none());
        assert!(uuid::Uuid::parse_str(&request.idempotency_key).is_ok());
    }

    #[test]
    fn test_withdrawal_response_hydrates_blockchain() {
        let response = CreateWithdrawalResponse::from_value(json!({
            "activity_id": "a-1",
            "blockchain_destination": {"address": "0xabc", "network": {"id": "ethereum-mainnet"}}
        }));

        let destination = response.record("blockchain_destination").unwrap();
        assert_eq!(destination.str("address"), Some("0xabc"));
        assert_eq!(
            destination.record("network").and_then(|n| n.str("id")),
            Some("ethereum-mainnet")
        );
    }

    #[test]
    fn test_conversion_body() {
        let request = CreateConversionRequest::new("p1", "w-usdc", "w-usd", "250", "USDC", "USD")
            .with_idempotency_key("k-1");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": "250",
                "destination": "w-usd",
                "idempotency_key": "k-1",
                "source_symbol": "USDC",
                "destination_symbol": "USD"
            })
        );
    }
}
