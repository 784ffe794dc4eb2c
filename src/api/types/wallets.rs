//! Wallet, address and onchain types for the Prime REST API.

use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{PaginationParams, QueryParams, WalletDepositType, WalletType};

lazy_static! {
    static ref CREATE_WALLET: Schema = Schema::builder("CreateWalletResponse")
        .primitives(&["activity_id", "name", "symbol", "wallet_type", "network_family"])
        .build();
    static ref GET_WALLET: Schema = Schema::builder("GetWalletResponse")
        .structured("wallet", &WALLET)
        .build();
    static ref LIST_WALLETS: Schema = Schema::builder("ListWalletsResponse")
        .list_of_structured("wallets", &WALLET)
        .structured("pagination", &PAGINATION)
        .build();
    static ref GET_WALLET_BALANCE: Schema = Schema::builder("GetWalletBalanceResponse")
        .structured("balance", &BALANCE)
        .build();
    static ref GET_WALLET_DEPOSIT_INSTRUCTIONS: Schema =
        Schema::builder("GetWalletDepositInstructionsResponse")
            .structured("crypto_instructions", &CRYPTO_INSTRUCTIONS)
            .structured("fiat_instructions", &FIAT_INSTRUCTIONS)
            .build();
    static ref CREATE_WALLET_ADDRESS: Schema = Schema::builder("CreateWalletAddressResponse")
        .primitives(&["address", "account_identifier"])
        .structured("network", &NETWORK)
        .build();
    static ref LIST_WALLET_ADDRESSES: Schema = Schema::builder("ListWalletAddressesResponse")
        .list_of_structured("addresses", &BLOCKCHAIN)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_WEB3_WALLET_BALANCES: Schema = Schema::builder("ListWeb3WalletBalancesResponse")
        .list_of_structured("balances", &ONCHAIN_BALANCE)
        .list_of_structured("defi_balances", &DEFI_BALANCE)
        .structured("pagination", &PAGINATION)
        .build();
    static ref REQUEST_TO_STAKE_OR_DELEGATE: Schema =
        Schema::builder("RequestToStakeOrDelegateResponse")
            .primitives(&["wallet_id", "transaction_id", "activity_id"])
            .build();
    static ref STAKING_ACK: Schema = Schema::builder("StakingResponse")
        .primitives(&["wallet_id", "transaction_id", "activity_id"])
        .build();
    static ref CREATE_ONCHAIN_TRANSACTION: Schema =
        Schema::builder("CreateOnchainTransactionResponse")
            .primitive("transaction_id")
            .build();
}

hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets.
    CreateWalletResponse => CREATE_WALLET
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets/{wallet_id}.
    GetWalletResponse => GET_WALLET
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets.
    ListWalletsResponse => LIST_WALLETS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/balance.
    GetWalletBalanceResponse => GET_WALLET_BALANCE
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/deposit_instructions.
    GetWalletDepositInstructionsResponse => GET_WALLET_DEPOSIT_INSTRUCTIONS
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/addresses.
    CreateWalletAddressResponse => CREATE_WALLET_ADDRESS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/addresses.
    ListWalletAddressesResponse => LIST_WALLET_ADDRESSES
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/web3_balances.
    ListWeb3WalletBalancesResponse => LIST_WEB3_WALLET_BALANCES
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/staking/initiate.
    RequestToStakeOrDelegateResponse => REQUEST_TO_STAKE_OR_DELEGATE
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/staking/initiate.
    CreateStakeResponse => STAKING_ACK
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/staking/unstake.
    CreateUnstakeResponse => STAKING_ACK
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/onchain_transaction.
    CreateOnchainTransactionResponse => CREATE_ONCHAIN_TRANSACTION
}

/// Request for POST /portfolios/{portfolio_id}/wallets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateWalletRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub name: String,
    pub symbol: String,
    pub wallet_type: WalletType,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateWalletRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        wallet_type: WalletType,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            name: name.into(),
            symbol: symbol.into(),
            wallet_type,
            allowed_status_codes: Vec::new(),
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets/{wallet_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetWalletRequest {
    pub portfolio_id: String,
    pub wallet_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetWalletRequest {
    pub fn new(portfolio_id: impl Into<String>, wallet_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListWalletsRequest {
    pub portfolio_id: String,
    pub wallet_type: Option<WalletType>,
    pub symbols: Vec<String>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListWalletsRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_wallet_type(mut self, wallet_type: WalletType) -> Self {
        self.wallet_type = Some(wallet_type);
        self
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .opt("type", self.wallet_type)
            .list("symbols", &self.symbols)
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetWalletBalanceRequest {
    pub portfolio_id: String,
    pub wallet_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetWalletBalanceRequest {
    pub fn new(portfolio_id: impl Into<String>, wallet_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/deposit_instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct GetWalletDepositInstructionsRequest {
    pub portfolio_id: String,
    pub wallet_id: String,
    pub deposit_type: WalletDepositType,
    /// Network to deposit on, sent as `network.id`
    pub network_id: Option<String>,
    pub allowed_status_codes: Vec<u16>,
}

impl GetWalletDepositInstructionsRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        deposit_type: WalletDepositType,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            deposit_type,
            network_id: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .param("deposit_type", self.deposit_type)
            .opt("network.id", self.network_id.as_deref())
    }
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateWalletAddressRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub network_id: String,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateWalletAddressRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        network_id: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            network_id: network_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/addresses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListWalletAddressesRequest {
    pub portfolio_id: String,
    pub wallet_id: String,
    pub network_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListWalletAddressesRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        network_id: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            network_id: network_id.into(),
            ..Default::default()
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .param("network_id", &self.network_id)
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/wallets/{wallet_id}/web3_balances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListWeb3WalletBalancesRequest {
    pub portfolio_id: String,
    pub wallet_id: String,
    pub visibility_statuses: Vec<String>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListWeb3WalletBalancesRequest {
    pub fn new(portfolio_id: impl Into<String>, wallet_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            ..Default::default()
        }
    }

    pub fn with_visibility_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visibility_statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("visibility_statuses", &self.visibility_statuses)
            .pagination(self.pagination.as_ref())
    }
}

/// Staking inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StakeInputs {
    pub amount: String,
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/staking/initiate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestToStakeOrDelegateRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub idempotency_key: String,
    /// Omit to stake the full wallet balance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<StakeInputs>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl RequestToStakeOrDelegateRequest {
    /// Create a request with a fresh random idempotency key.
    pub fn new(portfolio_id: impl Into<String>, wallet_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            idempotency_key: uuid::Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = key.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.inputs = Some(StakeInputs {
            amount: amount.into(),
        });
        self
    }
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/staking/initiate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateStakeRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub idempotency_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<StakeInputs>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/staking/unstake.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateUnstakeRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    pub idempotency_key: String,
    /// Omit to unstake everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<StakeInputs>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

macro_rules! staking_builders {
    ($($request:ty),+) => {
        $(
            impl $request {
                /// Create a request with a fresh random idempotency key.
                pub fn new(portfolio_id: impl Into<String>, wallet_id: impl Into<String>) -> Self {
                    Self {
                        portfolio_id: portfolio_id.into(),
                        wallet_id: wallet_id.into(),
                        idempotency_key: uuid::Uuid::new_v4().to_string(),
                        ..Default::default()
                    }
                }

                pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
                    self.idempotency_key = key.into();
                    self
                }

                pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
                    self.inputs = Some(StakeInputs {
                        amount: amount.into(),
                    });
                    self
                }
            }
        )+
    };
}

staking_builders!(CreateStakeRequest, CreateUnstakeRequest);

/// RPC options for an onchain transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rpc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_broadcast: Option<bool>,
    /// Custom RPC endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// EVM-specific options for an onchain transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvmParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_dynamic_gas: Option<bool>,
    /// Transaction to speed up or cancel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
}

/// Request for POST /portfolios/{portfolio_id}/wallets/{wallet_id}/onchain_transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateOnchainTransactionRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    #[serde(skip)]
    pub wallet_id: String,
    /// Hex-encoded unsigned transaction
    pub raw_unsigned_txn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc: Option<Rpc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evm_params: Option<EvmParams>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateOnchainTransactionRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        wallet_id: impl Into<String>,
        raw_unsigned_txn: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            wallet_id: wallet_id.into(),
            raw_unsigned_txn: raw_unsigned_txn.into(),
            ..Default::default()
        }
    }

    pub fn with_rpc(mut self, rpc: Rpc) -> Self {
        self.rpc = Some(rpc);
        self
    }

    pub fn with_evm_params(mut self, evm_params: EvmParams) -> Self {
        self.evm_params = Some(evm_params);
        self
    }
}

allowed_status_codes!(
    CreateWalletRequest,
    GetWalletRequest,
    ListWalletsRequest,
    GetWalletBalanceRequest,
    GetWalletDepositInstructionsRequest,
    CreateWalletAddressRequest,
    ListWalletAddressesRequest,
    ListWeb3WalletBalancesRequest,
    RequestToStakeOrDelegateRequest,
    CreateStakeRequest,
    CreateUnstakeRequest,
    CreateOnchainTransactionRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_wallet_body() {
        let request = CreateWalletRequest::new("p1", "Cold storage", "ETH", WalletType::Vault);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Cold storage", "symbol": "ETH", "wallet_type": "VAULT"})
        );
    }

    #[test]
    fn test_list_wallets_query() {
        let request = ListWalletsRequest::new("p1")
            .with_wallet_type(WalletType::Trading)
            .with_symbols(["BTC", "SOL"]);

        assert_eq!(
            request.query().to_query_string(),
            "type=TRADING&symbols=BTC&symbols=SOL"
        );
    }

    #[test]
    fn test_deposit_instructions_query_uses_dotted_network_key() {
        let request = GetWalletDepositInstructionsRequest::new("p1", "w1", WalletDepositType::Crypto)
            .with_network_id("base-mainnet");

        assert_eq!(
            request.query().to_query_string(),
            "deposit_type=CRYPTO&network.id=base-mainnet"
        );
    }

    #[test]
    fn test_onchain_transaction_body_skips_unset_options() {
        let request = CreateOnchainTransactionRequest::new("p1", "w1", "0xdeadbeef").with_evm_params(
            EvmParams {
                chain_id: Some("8453".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"raw_unsigned_txn": "0xdeadbeef", "evm_params": {"chain_id": "8453"}})
        );
    }

    #[test]
    fn test_stake_request_body() {
        let request = RequestToStakeOrDelegateRequest::new("p1", "w1")
            .with_idempotency_key("k-1")
            .with_amount("32");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"idempotency_key": "k-1", "inputs": {"amount": "32"}})
        );
    }

    #[test]
    fn test_web3_balances_response() {
        let response = ListWeb3WalletBalancesResponse::from_value(json!({
            "balances": [{"asset": {"symbol": "ETH"}, "amount": "1.0"}],
            "defi_balances": [],
            "pagination": {"next_cursor": "", "has_next": false}
        }));

        assert_eq!(response.records("balances").len(), 1);
        assert!(response.records("defi_balances").is_empty());
        assert_eq!(response.record("pagination").and_then(|p| p.bool("has_next")), Some(false));
    }

    #[test]
    fn test_unstake_body() {
        let request = CreateUnstakeRequest::new("p1", "w1")
            .with_idempotency_key("k-2")
            .with_amount("32");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"idempotency_key": "k-2", "inputs": {"amount": "32"}})
        );

        let full = CreateStakeRequest::new("p1", "w1");
        let body = serde_json::to_value(&full).unwrap();
        assert!(body.get("inputs").is_none());
        assert_eq!(body["idempotency_key"].as_str().map(str::len), Some(36));
    }
}
