//! Shared model schemas for Prime API payloads.
//!
//! Each model is a lazily built `'static` [`Schema`]. Endpoint response schemas in
//! [`crate::api::types`] refer to these for their nested and list fields.
//!
//! All scalar fields are declared primitive: Prime sends decimals as strings and the hydrator
//! does not coerce, so callers read them with [`Record::str`](crate::hydrate::Record::str) and
//! parse as needed.

use lazy_static::lazy_static;

use crate::hydrate::Schema;

lazy_static! {
    // ── Portfolios & users ───────────────────────────────────────────────────

    pub static ref PORTFOLIO: Schema = Schema::builder("Portfolio")
        .primitives(&["id", "name", "entity_id", "organization_id", "entity_name"])
        .build();

    pub static ref PORTFOLIO_USER: Schema = Schema::builder("PortfolioUser")
        .primitives(&["id", "name", "email", "portfolio_id", "entity_id", "role"])
        .build();

    pub static ref USER: Schema = Schema::builder("User")
        .primitives(&["id", "name", "email", "entity_id", "role"])
        .build();

    // ── Networks, addresses & assets ─────────────────────────────────────────

    pub static ref NETWORK: Schema = Schema::builder("Network")
        .primitives(&["id", "type"])
        .build();

    pub static ref BLOCKCHAIN: Schema = Schema::builder("Blockchain")
        .primitives(&["address", "account_identifier"])
        .structured("network", &NETWORK)
        .build();

    pub static ref ONCHAIN_ADDRESS: Schema = Schema::builder("OnchainAddress")
        .primitives(&["name", "address"])
        .list_of_primitives("chain_ids")
        .build();

    pub static ref ADDRESS_GROUP: Schema = Schema::builder("AddressGroup")
        .primitives(&["id", "name", "network_type"])
        .list_of_structured("addresses", &ONCHAIN_ADDRESS)
        .primitive("added_at")
        .build();

    pub static ref ASSET_NETWORK: Schema = Schema::builder("AssetNetwork")
        .structured("network", &NETWORK)
        .primitives(&[
            "name",
            "max_decimals",
            "default",
            "trading_supported",
            "vault_supported",
            "prime_custody_supported",
            "destination_tag_required",
            "network_link",
        ])
        .build();

    pub static ref ASSET: Schema = Schema::builder("Asset")
        .primitives(&["name", "symbol", "decimal_precision", "trading_supported", "explorer_url"])
        .list_of_structured("networks", &ASSET_NETWORK)
        .build();

    pub static ref ADDED_BY: Schema = Schema::builder("AddedBy")
        .primitives(&["id", "name", "avatar_url"])
        .build();

    pub static ref ADDRESS_BOOK_ENTRY: Schema = Schema::builder("AddressBookEntry")
        .primitives(&[
            "id",
            "currency_symbol",
            "name",
            "address",
            "account_identifier",
            "account_identifier_name",
            "state",
            "explorer_link",
            "last_used_at",
            "added_at",
        ])
        .structured("added_by", &ADDED_BY)
        .primitives(&["type", "counterparty_id"])
        .build();

    // ── Activities ───────────────────────────────────────────────────────────

    pub static ref CONSENSUS_METADATA: Schema = Schema::builder("ConsensusMetadata")
        .primitives(&["approval_deadline", "has_passed_consensus"])
        .build();

    pub static ref TRANSACTIONS_METADATA: Schema = Schema::builder("TransactionsMetadata")
        .structured("consensus", &CONSENSUS_METADATA)
        .build();

    pub static ref ACCOUNT_METADATA: Schema = Schema::builder("AccountMetadata")
        .structured("consensus", &CONSENSUS_METADATA)
        .build();

    pub static ref USER_ACTION: Schema = Schema::builder("UserAction")
        .primitives(&["action", "user_id", "timestamp"])
        .build();

    pub static ref ACTIVITY: Schema = Schema::builder("Activity")
        .primitives(&[
            "id",
            "reference_id",
            "category",
            "type",
            "secondary_type",
            "status",
            "created_by",
            "title",
            "description",
        ])
        .list_of_structured("user_actions", &USER_ACTION)
        .structured("transactions_metadata", &TRANSACTIONS_METADATA)
        .structured("account_metadata", &ACCOUNT_METADATA)
        .list_of_primitives("symbols")
        .primitives(&["created_at", "updated_at", "hierarchy_type"])
        .build();

    // ── Allocations ──────────────────────────────────────────────────────────

    pub static ref ALLOCATION_DESTINATION: Schema = Schema::builder("AllocationDestination")
        .primitives(&[
            "leg_id",
            "portfolio_id",
            "allocation_base",
            "allocation_quote",
            "fees_allocated_leg",
        ])
        .build();

    pub static ref ALLOCATION: Schema = Schema::builder("Allocation")
        .primitives(&[
            "root_id",
            "reversal_id",
            "allocation_completed_at",
            "user_id",
            "product_id",
            "side",
            "avg_price",
            "base_quantity",
            "quote_value",
            "fees_allocated",
            "status",
            "source",
        ])
        .list_of_primitives("order_ids")
        .list_of_structured("destinations", &ALLOCATION_DESTINATION)
        .primitive("netting_id")
        .build();

    // ── Orders, fills & products ─────────────────────────────────────────────

    pub static ref ORDER: Schema = Schema::builder("Order")
        .primitives(&[
            "id",
            "user_id",
            "portfolio_id",
            "product_id",
            "side",
            "client_order_id",
            "type",
            "base_quantity",
            "quote_value",
            "limit_price",
            "start_time",
            "expiry_time",
            "status",
            "time_in_force",
            "created_at",
            "filled_quantity",
            "filled_value",
            "average_filled_price",
            "commission",
            "exchange_fee",
            "historical_pov",
            "stop_price",
            "net_average_filled_price",
            "user_context",
            "client_product_id",
        ])
        .build();

    pub static ref FILL: Schema = Schema::builder("Fill")
        .primitives(&[
            "id",
            "order_id",
            "product_id",
            "client_product_id",
            "side",
            "filled_quantity",
            "filled_value",
            "price",
            "time",
            "commission",
            "venue",
        ])
        .build();

    pub static ref RFQ_PRODUCT_DETAILS: Schema = Schema::builder("RfqProductDetails")
        .primitives(&["tradable", "min_notional_size", "max_notional_size"])
        .build();

    pub static ref PRODUCT: Schema = Schema::builder("Product")
        .primitives(&[
            "id",
            "base_increment",
            "quote_increment",
            "base_min_size",
            "quote_min_size",
            "base_max_size",
            "quote_max_size",
        ])
        .list_of_primitives("permissions")
        .primitive("price_increment")
        .structured("rfq_product_details", &RFQ_PRODUCT_DETAILS)
        .build();

    pub static ref COMMISSION: Schema = Schema::builder("Commission")
        .primitives(&["type", "rate", "trading_volume"])
        .build();

    // ── Credit, margin & financing ───────────────────────────────────────────

    pub static ref AMOUNT_DUE: Schema = Schema::builder("AmountDue")
        .primitives(&["currency", "amount", "due_date"])
        .build();

    pub static ref POST_TRADE_CREDIT: Schema = Schema::builder("PostTradeCredit")
        .primitives(&[
            "portfolio_id",
            "currency",
            "limit",
            "utilized",
            "available",
            "frozen",
            "frozen_reason",
        ])
        .list_of_structured("amounts_due", &AMOUNT_DUE)
        .primitives(&["enabled", "adjusted_credit_utilized", "adjusted_portfolio_equity"])
        .build();

    pub static ref BUYING_POWER: Schema = Schema::builder("BuyingPower")
        .primitives(&[
            "portfolio_id",
            "base_currency",
            "quote_currency",
            "base_buying_power",
            "quote_buying_power",
        ])
        .build();

    pub static ref WITHDRAWAL_POWER: Schema = Schema::builder("WithdrawalPower")
        .primitives(&["symbol", "amount"])
        .build();

    pub static ref TIERED_FEE: Schema = Schema::builder("TieredFee")
        .primitives(&["symbol", "fee"])
        .build();

    pub static ref LOCATE_AVAILABILITY: Schema = Schema::builder("LocateAvailability")
        .primitives(&["symbol", "quantity", "rate"])
        .build();

    pub static ref ACCRUAL: Schema = Schema::builder("Accrual")
        .primitives(&[
            "accrual_id",
            "date",
            "portfolio_id",
            "symbol",
            "type",
            "rate",
            "nominal_accrual",
            "notional_accrual",
            "conversion_rate",
            "loan_amount",
        ])
        .build();

    pub static ref MARGIN_SUMMARY: Schema = Schema::builder("MarginSummary")
        .primitives(&[
            "entity_id",
            "margin_requirement",
            "total_margin",
            "margin_excess_shortfall",
            "margin_level",
            "margin_call_amount",
            "created_at",
        ])
        .build();

    pub static ref MARGIN_CALL_RECORD: Schema = Schema::builder("MarginCallRecord")
        .primitives(&[
            "margin_call_id",
            "initial_notional_amount",
            "outstanding_notional_amount",
            "created_at",
            "due_at",
        ])
        .build();

    pub static ref MARGIN_INFORMATION: Schema = Schema::builder("MarginInformation")
        .list_of_structured("margin_call_records", &MARGIN_CALL_RECORD)
        .structured("margin_summary", &MARGIN_SUMMARY)
        .build();

    pub static ref EXISTING_LOCATE: Schema = Schema::builder("ExistingLocate")
        .primitives(&[
            "locate_id",
            "entity_id",
            "portfolio_id",
            "symbol",
            "requested_amount",
            "interest_rate",
            "status",
            "approved_amount",
            "conversion_date",
            "created_at",
            "locate_date",
        ])
        .build();

    pub static ref ENTITY_POSITION: Schema = Schema::builder("EntityPosition")
        .primitives(&["symbol", "long", "short", "position_reference"])
        .build();

    pub static ref MARGIN_CONVERSION: Schema = Schema::builder("MarginConversion")
        .primitives(&[
            "portfolio_id",
            "source_currency",
            "target_currency",
            "source_amount",
            "target_amount",
            "conversion_time",
        ])
        .build();

    // ── Futures ──────────────────────────────────────────────────────────────

    pub static ref POSITION: Schema = Schema::builder("Position")
        .primitives(&[
            "product_id",
            "side",
            "number_of_contracts",
            "daily_realized_pnl",
            "unrealized_pnl",
            "current_price",
            "avg_entry_price",
            "expiration_time",
        ])
        .build();

    pub static ref FCM_BALANCE: Schema = Schema::builder("FcmBalance")
        .primitives(&[
            "portfolio_id",
            "cfm_usd_balance",
            "unrealized_pnl",
            "daily_realized_pnl",
            "excess_liquidity",
            "futures_buying_power",
            "initial_margin",
            "maintenance_margin",
            "clearing_account_id",
        ])
        .build();

    pub static ref FUTURES_POSITION: Schema = Schema::builder("FuturesPosition")
        .primitives(&[
            "product_id",
            "side",
            "number_of_contracts",
            "daily_realized_pnl",
            "unrealized_pnl",
            "current_price",
            "avg_entry_price",
            "expiration_time",
        ])
        .build();

    pub static ref REQUESTED_AMOUNT: Schema = Schema::builder("RequestedAmount")
        .primitives(&["currency", "amount"])
        .build();

    pub static ref SWEEP: Schema = Schema::builder("Sweep")
        .primitive("id")
        .structured("requested_amount", &REQUESTED_AMOUNT)
        .primitives(&["should_sweep_all", "status", "scheduled_time"])
        .build();

    // ── Transactions ─────────────────────────────────────────────────────────

    pub static ref TRANSFER_LOCATION: Schema = Schema::builder("TransferLocation")
        .primitives(&["type", "value"])
        .build();

    pub static ref ESTIMATED_NETWORK_FEES: Schema = Schema::builder("EstimatedNetworkFees")
        .primitives(&["lower_bound", "upper_bound"])
        .build();

    pub static ref COLLECTION: Schema = Schema::builder("Collection")
        .primitive("name")
        .build();

    pub static ref ITEM: Schema = Schema::builder("Item")
        .primitive("name")
        .build();

    pub static ref ASSET_CHANGE: Schema = Schema::builder("AssetChange")
        .primitives(&["type", "symbol", "amount"])
        .structured("collection", &COLLECTION)
        .structured("item", &ITEM)
        .build();

    pub static ref MATCH_METADATA: Schema = Schema::builder("MatchMetadata")
        .primitives(&["reference_id", "settlement_date"])
        .build();

    pub static ref WEB3_TRANSACTION_METADATA: Schema = Schema::builder("Web3TransactionMetadata")
        .primitive("label")
        .list_of_structured("confirmed_asset_changes", &ASSET_CHANGE)
        .build();

    pub static ref TRANSACTION_METADATA: Schema = Schema::builder("TransactionMetadata")
        .structured("match_metadata", &MATCH_METADATA)
        .structured("web3_transaction_metadata", &WEB3_TRANSACTION_METADATA)
        .build();

    pub static ref RISK_ASSESSMENT: Schema = Schema::builder("RiskAssessment")
        .primitives(&["compliance_risk_detected", "security_risk_detected"])
        .build();

    pub static ref ONCHAIN_DETAILS: Schema = Schema::builder("OnchainDetails")
        .primitive("signed_transaction")
        .structured("risk_assessment", &RISK_ASSESSMENT)
        .primitives(&[
            "chain_id",
            "nonce",
            "replaced_transaction_id",
            "destination_address",
            "skip_broadcast",
            "failure_reason",
            "signing_status",
        ])
        .build();

    pub static ref TRANSACTION: Schema = Schema::builder("Transaction")
        .primitives(&[
            "id",
            "wallet_id",
            "portfolio_id",
            "type",
            "status",
            "symbol",
            "created_at",
            "completed_at",
            "amount",
        ])
        .structured("transfer_from", &TRANSFER_LOCATION)
        .structured("transfer_to", &TRANSFER_LOCATION)
        .primitives(&["network_fees", "fees", "fee_symbol"])
        .list_of_primitives("blockchain_ids")
        .primitives(&["transaction_id", "destination_symbol"])
        .structured("estimated_network_fees", &ESTIMATED_NETWORK_FEES)
        .primitive("network")
        .list_of_structured("estimated_asset_changes", &ASSET_CHANGE)
        .structured("metadata", &TRANSACTION_METADATA)
        .primitive("idempotency_key")
        .structured("onchain_details", &ONCHAIN_DETAILS)
        .structured("network_info", &NETWORK)
        .build();

    // ── Balances & wallets ───────────────────────────────────────────────────

    pub static ref BALANCE: Schema = Schema::builder("Balance")
        .primitives(&[
            "symbol",
            "amount",
            "holds",
            "bonded_amount",
            "reserved_amount",
            "unbonding_amount",
            "unvested_amount",
            "pending_rewards_amount",
            "past_rewards_amount",
            "bondable_amount",
            "withdrawable_amount",
            "fiat_amount",
            "unbondable_amount",
        ])
        .build();

    pub static ref BALANCE_WITH_HOLDS: Schema = Schema::builder("BalanceWithHolds")
        .primitives(&["total", "holds"])
        .build();

    pub static ref DEFI_BALANCE: Schema = Schema::builder("DefiBalance")
        .primitives(&["network", "protocol", "net_usd_value"])
        .build();

    pub static ref ONCHAIN_BALANCE: Schema = Schema::builder("OnchainBalance")
        .structured("asset", &ASSET)
        .primitives(&["amount", "visibility_status"])
        .build();

    pub static ref CRYPTO_INSTRUCTIONS: Schema = Schema::builder("CryptoInstructions")
        .primitives(&[
            "id",
            "name",
            "type",
            "address",
            "account_identifier",
            "account_identifier_name",
        ])
        .structured("network", &NETWORK)
        .build();

    pub static ref FIAT_INSTRUCTIONS: Schema = Schema::builder("FiatInstructions")
        .primitives(&[
            "id",
            "name",
            "type",
            "account_number",
            "routing_number",
            "reference_code",
        ])
        .build();

    pub static ref WALLET: Schema = Schema::builder("Wallet")
        .primitives(&["id", "name", "symbol", "type", "created_at", "address", "visibility"])
        .structured("network", &NETWORK)
        .build();

    // ── Entities: payment methods & invoices ─────────────────────────────────

    pub static ref PAYMENT_METHOD_DETAILS: Schema = Schema::builder("PaymentMethodDetails")
        .primitives(&["id", "symbol", "payment_method_type", "name", "account_number", "bank_code"])
        .build();

    pub static ref INVOICE_ITEM: Schema = Schema::builder("InvoiceItem")
        .primitives(&[
            "description",
            "currency_symbol",
            "invoice_type",
            "rate",
            "quantity",
            "price",
            "average_auc",
            "total",
        ])
        .build();

    pub static ref INVOICE: Schema = Schema::builder("Invoice")
        .primitives(&[
            "id",
            "billing_month",
            "billing_year",
            "due_date",
            "invoice_number",
            "state",
            "usd_amount_paid",
            "usd_amount_owed",
        ])
        .list_of_structured("invoice_items", &INVOICE_ITEM)
        .build();

    // ── Pagination ───────────────────────────────────────────────────────────

    pub static ref PAGINATION: Schema = Schema::builder("Pagination")
        .primitives(&["next_cursor", "sort_direction", "has_next"])
        .build();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::{FieldType, Record};
    use serde_json::json;

    #[test]
    fn test_transaction_nested_shapes() {
        let record = Record::hydrate(
            &TRANSACTION,
            json!({
                "id": "tx-1",
                "transfer_to": {"type": "ADDRESS", "value": "0xabc"},
                "blockchain_ids": ["h1", "h2"],
                "estimated_asset_changes": [
                    {"type": "TRANSFER", "symbol": "ETH", "collection": {"name": "c"}}
                ],
                "metadata": {"web3_transaction_metadata": {
                    "label": "swap",
                    "confirmed_asset_changes": [{"symbol": "USDC", "item": {"name": "i"}}]
                }},
                "network_info": {"id": "ethereum-mainnet", "type": "EVM"}
            }),
        );

        assert_eq!(record.record("transfer_to").and_then(|r| r.str("value")), Some("0xabc"));
        assert_eq!(record.strings("blockchain_ids"), vec!["h1", "h2"]);
        let change = record.records("estimated_asset_changes")[0];
        assert_eq!(change.record("collection").and_then(|c| c.str("name")), Some("c"));
        let web3 = record
            .record("metadata")
            .and_then(|m| m.record("web3_transaction_metadata"))
            .unwrap();
        assert_eq!(
            web3.records("confirmed_asset_changes")[0]
                .record("item")
                .and_then(|i| i.str("name")),
            Some("i")
        );
        assert_eq!(
            record.record("network_info").and_then(|n| n.str("type")),
            Some("EVM")
        );
    }

    #[test]
    fn test_address_group_uses_onchain_addresses() {
        let field = ADDRESS_GROUP.field("addresses").unwrap();
        assert_eq!(
            field.field_type(),
            &FieldType::list_of(FieldType::Structured(&ONCHAIN_ADDRESS))
        );
    }

    #[test]
    fn test_model_field_names_are_unique() {
        for schema in [&*ORDER, &*TRANSACTION, &*ACTIVITY, &*BALANCE, &*ADDRESS_BOOK_ENTRY] {
            let mut names: Vec<&str> = schema.fields().iter().map(|f| f.name()).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate field in {}", schema.name());
        }
    }
}
