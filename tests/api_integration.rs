//! Integration tests for the Prime REST API client.
//!
//! These tests exercise response hydration, request bodies and client configuration through the
//! public API. For live API tests, build with `--features live_tests` and set `PRIME_CREDENTIALS`.

use prime_sdk::api::models::{ORDER, PORTFOLIO};
use prime_sdk::prelude::*;
use serde_json::json;

// =============================================================================
// Hydration
// =============================================================================

mod hydration {
    use super::*;

    #[test]
    fn test_list_portfolios_response_parsing() {
        let response: ListPortfoliosResponse = serde_json::from_value(json!({
            "portfolios": [{
                "id": "fake-portfolio-id-123",
                "name": "CryptoBalances",
                "entity_id": "fake-entity-id",
                "organization_id": "fake-org-id",
                "entity_name": "Sample Prime Entity"
            }]
        }))
        .unwrap();

        assert!(response.raw().get("portfolios").is_some());
        let portfolios = response.records("portfolios");
        assert_eq!(portfolios.len(), 1);

        let portfolio = portfolios[0];
        assert_eq!(portfolio.schema().name(), PORTFOLIO.name());
        assert_eq!(portfolio.str("id"), Some("fake-portfolio-id-123"));
        assert_eq!(portfolio.str("name"), Some("CryptoBalances"));
        assert_eq!(portfolio.str("entity_id"), Some("fake-entity-id"));
        assert_eq!(portfolio.str("organization_id"), Some("fake-org-id"));
        assert_eq!(portfolio.str("entity_name"), Some("Sample Prime Entity"));
    }

    #[test]
    fn test_get_order_response_parsing() {
        let response: GetOrderResponse = serde_json::from_str(
            r#"{
                "order": {
                    "id": "order-123",
                    "user_id": "user-abc",
                    "portfolio_id": "portfolio-xyz",
                    "product_id": "BTC-USD",
                    "side": "BUY",
                    "client_order_id": "client-order-1",
                    "type": "LIMIT",
                    "base_quantity": "1.0",
                    "limit_price": "60000.00",
                    "status": "FILLED",
                    "time_in_force": "GOOD_UNTIL_CANCELLED",
                    "filled_quantity": "1.0",
                    "average_filled_price": "60000.00",
                    "user_context": "some-context"
                }
            }"#,
        )
        .unwrap();

        let order = response.record("order").unwrap();
        assert_eq!(order.schema().name(), ORDER.name());
        assert_eq!(order.str("id"), Some("order-123"));
        assert_eq!(order.str("side"), Some("BUY"));
        assert_eq!(order.str("status"), Some("FILLED"));
        assert_eq!(order.str("product_id"), Some("BTC-USD"));
        assert_eq!(order.str("type"), Some("LIMIT"));
        assert!(!order.is_present("stop_price"));
    }

    #[test]
    fn test_nested_lists_hydrate_each_element() {
        let response = ListOrderFillsResponse::from_value(json!({
            "fills": [
                {"id": "f1", "order_id": "o1", "price": "100.5", "filled_quantity": "0.5"},
                {"id": "f2", "order_id": "o1", "price": "101.0", "filled_quantity": "0.25"}
            ],
            "pagination": {"next_cursor": "abc", "has_next": true}
        }));

        let fills = response.records("fills");
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[1].str("price"), Some("101.0"));
        assert_eq!(fills[0].schema().name(), "Fill");

        let pagination = response.record("pagination").unwrap();
        assert_eq!(pagination.str("next_cursor"), Some("abc"));
        assert_eq!(pagination.bool("has_next"), Some(true));
    }

    #[test]
    fn test_shape_mismatch_passes_through() {
        let response = GetOrderResponse::from_value(json!({"order": "not-an-object"}));
        assert!(response.record("order").is_none());
        assert_eq!(
            response.get("order").and_then(FieldValue::as_raw),
            Some(&json!("not-an-object"))
        );

        let response = ListOrdersResponse::from_value(json!({"orders": [{"id": "o1"}, 7, null]}));
        let items = response.list("orders").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_record().and_then(|o| o.str("id")), Some("o1"));
        assert_eq!(items[1].as_raw(), Some(&json!(7)));
        assert_eq!(items[2].as_raw(), Some(&serde_json::Value::Null));
        assert_eq!(response.records("orders").len(), 1);
    }

    #[test]
    fn test_unknown_fields_stay_in_raw() {
        let response = GetPortfolioResponse::from_value(json!({
            "portfolio": {"id": "p1", "brand_new_field": 42}
        }));

        let portfolio = response.record("portfolio").unwrap();
        assert_eq!(portfolio.str("id"), Some("p1"));
        assert!(portfolio.get("brand_new_field").is_none());
        assert_eq!(portfolio.raw_field("brand_new_field"), Some(&json!(42)));
        assert_eq!(response.to_value(), json!({"portfolio": {"id": "p1"}}));
    }

    #[test]
    fn test_non_object_body_keeps_raw() {
        let response: ListPortfoliosResponse = serde_json::from_str("[1, 2]").unwrap();
        assert!(!response.is_present("portfolios"));
        assert_eq!(response.raw(), &json!([1, 2]));
    }

    #[test]
    fn test_display_is_raw_json() {
        let response = CancelOrderResponse::from_value(json!({"id": "o1"}));
        assert_eq!(response.to_string(), r#"{"id":"o1"}"#);
    }

    #[test]
    fn test_from_fields_hydrates_raw_values() {
        let response = GetOrderResponse::from_fields([(
            "order",
            FieldValue::from(json!({"id": "o1", "side": "SELL"})),
        )]);

        let order = response.record("order").unwrap();
        assert_eq!(order.str("side"), Some("SELL"));

        let record: Record = response.into_record();
        assert_eq!(record.schema().name(), "GetOrderResponse");
    }

    #[test]
    fn test_hydrate_against_model_schema() {
        let order = hydrate(&ORDER, json!({"id": "o1", "filled_value": "12.5"}));
        assert_eq!(order.str("filled_value"), Some("12.5"));
        assert_eq!(order.fields().count(), ORDER.len());
    }
}

// =============================================================================
// Request bodies and query strings
// =============================================================================

mod requests {
    use super::*;

    #[test]
    fn test_create_order_body() {
        let request =
            CreateOrderRequest::new("p1", "BTC-USD", OrderSide::Buy, OrderType::Limit)
                .with_client_order_id("c-1")
                .with_base_quantity("0.5")
                .with_limit_price("60000")
                .with_time_in_force(TimeInForce::GoodUntilCancelled)
                .with_allowed_status_codes([409]);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["product_id"], "BTC-USD");
        assert_eq!(body["side"], "BUY");
        assert_eq!(body["type"], "LIMIT");
        assert_eq!(body["client_order_id"], "c-1");
        assert_eq!(body["base_quantity"], "0.5");
        assert_eq!(body["time_in_force"], "GOOD_UNTIL_CANCELLED");
        assert!(body.get("portfolio_id").is_none());
        assert!(body.get("allowed_status_codes").is_none());
        assert!(body.get("quote_value").is_none());
    }

    #[test]
    fn test_client_order_id_defaults_to_uuid() {
        let a = CreateOrderRequest::new("p1", "ETH-USD", OrderSide::Sell, OrderType::Market);
        let b = CreateOrderRequest::new("p1", "ETH-USD", OrderSide::Sell, OrderType::Market);
        assert_eq!(a.client_order_id.len(), 36);
        assert_ne!(a.client_order_id, b.client_order_id);
    }

    #[test]
    fn test_allocation_body() {
        let request = CreatePortfolioAllocationsRequest::new("a-1", "p-src", "BTC-USD", SizeType::Percent)
            .with_order_ids(["o1", "o2"])
            .with_leg(AllocationLeg::new("leg-1", "p-dest", "100"));

        let body = serde_json::to_value(request.normalized()).unwrap();
        assert_eq!(body["size_type"], "PERCENT");
        assert_eq!(body["order_ids"], json!(["o1", "o2"]));
        assert_eq!(body["allocation_legs"][0]["destination_portfolio_id"], "p-dest");
    }

    #[test]
    fn test_pagination_params_serialize() {
        let pagination = PaginationParams::new()
            .with_cursor("next")
            .with_limit(50)
            .with_sort_direction(SortDirection::Asc);
        assert_eq!(pagination.limit, Some(50));
        assert_eq!(pagination.cursor.as_deref(), Some("next"));
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_value(WalletType::Vault).unwrap(), json!("VAULT"));
        assert_eq!(
            serde_json::to_value(BalanceType::Trading).unwrap(),
            json!("TRADING_BALANCES")
        );
        assert_eq!(
            serde_json::to_value(NetworkType::Solana).unwrap(),
            json!("NETWORK_TYPE_SOLANA")
        );
        assert_eq!(
            serde_json::to_value(ActivityLevel::Portfolio).unwrap(),
            json!("ACTIVITY_LEVEL_PORTFOLIO")
        );
        assert_eq!(serde_json::to_value(SortDirection::Desc).unwrap(), json!("DESC"));
    }
}

// =============================================================================
// Errors and credentials
// =============================================================================

mod error_types {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound(ErrorResponse::from_text("order not found"));
        assert!(err.to_string().contains("order not found"));
        assert_eq!(err.status(), Some(404));

        let err = ApiError::InvalidParameter("portfolio_id cannot be empty".to_string());
        assert!(err.to_string().contains("portfolio_id cannot be empty"));
        assert!(err.response().is_none());
    }

    #[test]
    fn test_error_response_from_body() {
        let response = ErrorResponse::from_body(r#"{"message": "invalid signature"}"#);
        assert_eq!(response.get_message(), "invalid signature");
    }

    #[test]
    fn test_credentials_error_converts() {
        let err: ApiError = CredentialsError::MissingField("signingKey").into();
        assert!(matches!(err, ApiError::Credentials(_)));
    }
}

mod credentials {
    use super::*;

    #[test]
    fn test_credentials_from_json() {
        let credentials = Credentials::from_json(
            r#"{"accessKey": "k", "passphrase": "p", "signingKey": "s", "portfolioId": "pid"}"#,
        )
        .unwrap();

        assert_eq!(credentials.access_key(), "k");
        assert_eq!(credentials.portfolio_id(), Some("pid"));
        assert_eq!(credentials.entity_id(), None);
    }

    #[test]
    fn test_credentials_missing_field() {
        let result = Credentials::from_json(r#"{"accessKey": "k", "passphrase": "p", "signingKey": ""}"#);
        assert!(matches!(result, Err(CredentialsError::MissingField("signingKey"))));

        let result = Credentials::from_json("not json");
        assert!(matches!(result, Err(CredentialsError::Malformed(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("key", "secret-passphrase", "secret-signing-key");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("key"));
        assert!(!debug.contains("secret-passphrase"));
        assert!(!debug.contains("secret-signing-key"));
    }

    #[test]
    fn test_signature_known_vector() {
        let credentials = Credentials::new("k", "p", "test_signing_key");
        assert_eq!(
            credentials.sign("1700000000", "GET", "/v1/portfolios", "").unwrap(),
            "B3iQf9NyckQUAB8SYtpJ/mvhALPLWoH4X6EqYbJeUIk="
        );
        assert_eq!(
            credentials
                .sign("1700000000", "GET", "/v1/portfolios?limit=10", "")
                .unwrap(),
            "B3iQf9NyckQUAB8SYtpJ/mvhALPLWoH4X6EqYbJeUIk="
        );
    }
}

// =============================================================================
// Client configuration
// =============================================================================

mod client_tests {
    use super::*;
    use std::time::Duration;

    fn credentials() -> Credentials {
        Credentials::new("key", "pass", "secret").with_portfolio_id("p1")
    }

    #[test]
    fn test_client_default_url() {
        let client = PrimeApiClient::new(credentials()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
        assert_eq!(client.credentials().portfolio_id(), Some("p1"));
    }

    #[test]
    fn test_client_builder() {
        let client = PrimeApiClient::builder(credentials())
            .base_url("http://localhost:3000/v1/")
            .timeout(Duration::from_secs(5))
            .header("X-Request-Source", "tests")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000/v1");
    }

    #[test]
    fn test_client_is_clone() {
        let client = PrimeApiClient::new(credentials()).unwrap();
        let cloned = client.clone();
        assert_eq!(client.base_url(), cloned.base_url());
    }

    #[tokio::test]
    async fn test_empty_ids_rejected_before_sending() {
        // Nothing listens here; validation must fail first.
        let client = PrimeApiClient::builder(credentials())
            .base_url("http://127.0.0.1:9/v1")
            .build()
            .unwrap();

        let result = client.get_order(GetOrderRequest::new("p1", "")).await;
        assert!(matches!(result, Err(ApiError::InvalidParameter(msg)) if msg == "order_id cannot be empty"));

        let result = client.list_wallets(ListWalletsRequest::new("  ")).await;
        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));

        let result = client
            .list_orders(
                ListOrdersRequest::new("p1").with_pagination(PaginationParams::new().with_limit(0)),
            )
            .await;
        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
    }
}

// =============================================================================
// Live API Tests (require PRIME_CREDENTIALS)
// =============================================================================

#[cfg(feature = "live_tests")]
mod live_tests {
    use super::*;

    fn get_client() -> Option<PrimeApiClient> {
        PrimeApiClient::from_env().ok()
    }

    #[tokio::test]
    async fn test_live_list_portfolios() {
        let Some(client) = get_client() else {
            println!("Skipping live test: PRIME_CREDENTIALS not set");
            return;
        };

        let result = client.list_portfolios(ListPortfoliosRequest::new()).await;
        assert!(result.is_ok(), "List portfolios failed: {:?}", result);
    }

    #[tokio::test]
    async fn test_live_list_portfolio_balances() {
        let Some(client) = get_client() else {
            println!("Skipping live test: PRIME_CREDENTIALS not set");
            return;
        };
        let Some(portfolio_id) = client.credentials().portfolio_id().map(str::to_string) else {
            println!("Skipping live test: no portfolioId in PRIME_CREDENTIALS");
            return;
        };

        let result = client
            .list_portfolio_balances(ListPortfolioBalancesRequest::new(portfolio_id))
            .await;
        assert!(result.is_ok(), "List balances failed: {:?}", result);
    }
}
