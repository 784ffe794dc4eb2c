//! Order, fill and product types for the Prime REST API.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{OrderSide, OrderType, PaginationParams, QueryParams, TimeInForce};

lazy_static! {
    static ref CREATE_ORDER: Schema = Schema::builder("CreateOrderResponse")
        .primitive("order_id")
        .build();
    static ref CREATE_ORDER_PREVIEW: Schema = Schema::builder("CreateOrderPreviewResponse")
        .primitives(&[
            "portfolio_id",
            "product_id",
            "side",
            "type",
            "base_quantity",
            "quote_value",
            "limit_price",
            "start_time",
            "expiry_time",
            "time_in_force",
            "commission",
            "slippage",
            "best_bid",
            "best_ask",
            "average_filled_price",
            "order_total",
            "historical_pov",
        ])
        .build();
    static ref CREATE_QUOTE: Schema = Schema::builder("CreateQuoteResponse")
        .primitives(&[
            "quote_id",
            "expiration_time",
            "best_price",
            "order_total",
            "price_inclusive_of_fees",
        ])
        .build();
    static ref ACCEPT_QUOTE: Schema = Schema::builder("AcceptQuoteResponse")
        .primitive("order_id")
        .build();
    static ref CANCEL_ORDER: Schema = Schema::builder("CancelOrderResponse")
        .primitive("id")
        .build();
    static ref GET_ORDER: Schema = Schema::builder("GetOrderResponse")
        .structured("order", &ORDER)
        .build();
    static ref LIST_ORDERS: Schema = Schema::builder("ListOrdersResponse")
        .list_of_structured("orders", &ORDER)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_OPEN_ORDERS: Schema = Schema::builder("ListOpenOrdersResponse")
        .list_of_structured("orders", &ORDER)
        .build();
    static ref LIST_ORDER_FILLS: Schema = Schema::builder("ListOrderFillsResponse")
        .list_of_structured("fills", &FILL)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_PORTFOLIO_FILLS: Schema = Schema::builder("ListPortfolioFillsResponse")
        .list_of_structured("fills", &FILL)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_PRODUCTS: Schema = Schema::builder("ListProductsResponse")
        .list_of_structured("products", &PRODUCT)
        .structured("pagination", &PAGINATION)
        .build();
}

hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/order.
    CreateOrderResponse => CREATE_ORDER
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/order_preview.
    CreateOrderPreviewResponse => CREATE_ORDER_PREVIEW
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/rfq.
    CreateQuoteResponse => CREATE_QUOTE
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/accept_quote.
    AcceptQuoteResponse => ACCEPT_QUOTE
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/orders/{order_id}/cancel.
    CancelOrderResponse => CANCEL_ORDER
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/orders/{order_id}.
    GetOrderResponse => GET_ORDER
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/orders.
    ListOrdersResponse => LIST_ORDERS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/open_orders.
    ListOpenOrdersResponse => LIST_OPEN_ORDERS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/orders/{order_id}/fills.
    ListOrderFillsResponse => LIST_ORDER_FILLS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/fills.
    ListPortfolioFillsResponse => LIST_PORTFOLIO_FILLS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/products.
    ListProductsResponse => LIST_PRODUCTS
}

/// Optional order parameters shared by order submission and preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderParams {
    /// Order size in base currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_quantity: Option<String>,
    /// Order size in quote currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<String>,
    /// Start of a TWAP/VWAP window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Expiry for GTD orders or end of a TWAP/VWAP window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Self-trade prevention id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_quote_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_base_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_raise_exact: Option<bool>,
    /// Participation rate for VWAP orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_pov: Option<String>,
}

/// Builder methods over [`OrderParams`] for the request types that embed it.
macro_rules! order_params_builders {
    ($($request:ty),+ $(,)?) => {
        $(
            impl $request {
                pub fn with_base_quantity(mut self, quantity: impl Into<String>) -> Self {
                    self.params.base_quantity = Some(quantity.into());
                    self
                }

                pub fn with_quote_value(mut self, value: impl Into<String>) -> Self {
                    self.params.quote_value = Some(value.into());
                    self
                }

                pub fn with_limit_price(mut self, price: impl Into<String>) -> Self {
                    self.params.limit_price = Some(price.into());
                    self
                }

                pub fn with_stop_price(mut self, price: impl Into<String>) -> Self {
                    self.params.stop_price = Some(price.into());
                    self
                }

                /// Set the execution window.
                pub fn with_time_window(mut self, start: DateTime<Utc>, expiry: DateTime<Utc>) -> Self {
                    self.params.start_time = Some(crate::shared::format_datetime(&start));
                    self.params.expiry_time = Some(crate::shared::format_datetime(&expiry));
                    self
                }

                pub fn with_expiry_time(mut self, expiry: DateTime<Utc>) -> Self {
                    self.params.expiry_time = Some(crate::shared::format_datetime(&expiry));
                    self
                }

                pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
                    self.params.time_in_force = Some(time_in_force);
                    self
                }

                pub fn with_stp_id(mut self, stp_id: impl Into<String>) -> Self {
                    self.params.stp_id = Some(stp_id.into());
                    self
                }

                pub fn with_historical_pov(mut self, pov: impl Into<String>) -> Self {
                    self.params.historical_pov = Some(pov.into());
                    self
                }

                pub fn with_params(mut self, params: OrderParams) -> Self {
                    self.params = params;
                    self
                }
            }
        )+
    };
}

/// Request for POST /portfolios/{portfolio_id}/order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub product_id: String,
    pub side: OrderSide,
    /// Caller-chosen idempotency id
    pub client_order_id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(flatten)]
    pub params: OrderParams,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateOrderRequest {
    /// Create an order with a fresh random `client_order_id`.
    pub fn new(
        portfolio_id: impl Into<String>,
        product_id: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            product_id: product_id.into(),
            side,
            client_order_id: uuid::Uuid::new_v4().to_string(),
            order_type,
            params: OrderParams::default(),
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = client_order_id.into();
        self
    }
}

/// Request for POST /portfolios/{portfolio_id}/order_preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderPreviewRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub product_id: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(flatten)]
    pub params: OrderParams,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateOrderPreviewRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        product_id: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            product_id: product_id.into(),
            side,
            order_type,
            params: OrderParams::default(),
            allowed_status_codes: Vec::new(),
        }
    }
}

order_params_builders!(CreateOrderRequest, CreateOrderPreviewRequest);

/// Request for POST /portfolios/{portfolio_id}/rfq.
///
/// Exactly one of `base_quantity` and `quote_value` should be set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateQuoteRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub product_id: String,
    pub side: OrderSide,
    pub client_quote_id: String,
    pub limit_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settl_currency: Option<String>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateQuoteRequest {
    /// Create a quote request with a fresh random `client_quote_id`.
    pub fn new(
        portfolio_id: impl Into<String>,
        product_id: impl Into<String>,
        side: OrderSide,
        limit_price: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            product_id: product_id.into(),
            side,
            client_quote_id: uuid::Uuid::new_v4().to_string(),
            limit_price: limit_price.into(),
            base_quantity: None,
            quote_value: None,
            settl_currency: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_client_quote_id(mut self, client_quote_id: impl Into<String>) -> Self {
        self.client_quote_id = client_quote_id.into();
        self
    }

    pub fn with_base_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.base_quantity = Some(quantity.into());
        self
    }

    pub fn with_quote_value(mut self, value: impl Into<String>) -> Self {
        self.quote_value = Some(value.into());
        self
    }

    pub fn with_settl_currency(mut self, currency: impl Into<String>) -> Self {
        self.settl_currency = Some(currency.into());
        self
    }
}

/// Request for POST /portfolios/{portfolio_id}/accept_quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptQuoteRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub product_id: String,
    pub side: OrderSide,
    pub client_order_id: String,
    pub quote_id: String,
    /// Settlement currency override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settl_currency: Option<String>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl AcceptQuoteRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        product_id: impl Into<String>,
        side: OrderSide,
        client_order_id: impl Into<String>,
        quote_id: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            product_id: product_id.into(),
            side,
            client_order_id: client_order_id.into(),
            quote_id: quote_id.into(),
            settl_currency: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_settl_currency(mut self, currency: impl Into<String>) -> Self {
        self.settl_currency = Some(currency.into());
        self
    }
}

/// Request for POST /portfolios/{portfolio_id}/orders/{order_id}/cancel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelOrderRequest {
    pub portfolio_id: String,
    pub order_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl CancelOrderRequest {
    pub fn new(portfolio_id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            order_id: order_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/orders/{order_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOrderRequest {
    pub portfolio_id: String,
    pub order_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetOrderRequest {
    pub fn new(portfolio_id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            order_id: order_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOrdersRequest {
    pub portfolio_id: String,
    pub order_statuses: Vec<String>,
    pub product_ids: Vec<String>,
    pub order_type: Option<OrderType>,
    pub order_side: Option<OrderSide>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListOrdersRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_order_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_product_ids<I, S>(mut self, product_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_ids = product_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn with_order_side(mut self, side: OrderSide) -> Self {
        self.order_side = Some(side);
        self
    }

    pub fn with_date_range(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.start_date = Some(start);
        self.end_date = end;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("order_statuses", &self.order_statuses)
            .list("product_ids", &self.product_ids)
            .opt("order_type", self.order_type)
            .opt("order_side", self.order_side)
            .datetime("start_date", self.start_date.as_ref())
            .datetime("end_date", self.end_date.as_ref())
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/open_orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOpenOrdersRequest {
    pub portfolio_id: String,
    pub product_ids: Vec<String>,
    pub order_type: Option<OrderType>,
    pub order_side: Option<OrderSide>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListOpenOrdersRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_product_ids<I, S>(mut self, product_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_ids = product_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn with_order_side(mut self, side: OrderSide) -> Self {
        self.order_side = Some(side);
        self
    }

    pub fn with_date_range(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.start_date = Some(start);
        self.end_date = end;
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("product_ids", &self.product_ids)
            .opt("order_type", self.order_type)
            .opt("order_side", self.order_side)
            .datetime("start_date", self.start_date.as_ref())
            .datetime("end_date", self.end_date.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/orders/{order_id}/fills.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOrderFillsRequest {
    pub portfolio_id: String,
    pub order_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListOrderFillsRequest {
    pub fn new(portfolio_id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            order_id: order_id.into(),
            ..Default::default()
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new().pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/fills.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPortfolioFillsRequest {
    pub portfolio_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListPortfolioFillsRequest {
    pub fn new(portfolio_id: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            start_date,
            end_date: None,
            pagination: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .datetime("start_date", Some(&self.start_date))
            .datetime("end_date", self.end_date.as_ref())
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProductsRequest {
    pub portfolio_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListProductsRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new().pagination(self.pagination.as_ref())
    }
}

allowed_status_codes!(
    CreateOrderRequest,
    CreateOrderPreviewRequest,
    CreateQuoteRequest,
    AcceptQuoteRequest,
    CancelOrderRequest,
    GetOrderRequest,
    ListOrdersRequest,
    ListOpenOrdersRequest,
    ListOrderFillsRequest,
    ListPortfolioFillsRequest,
    ListProductsRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_create_order_body() {
        let request = CreateOrderRequest::new("p1", "BTC-USD", OrderSide::Buy, OrderType::Limit)
            .with_client_order_id("c-1")
            .with_base_quantity("0.5")
            .with_limit_price("60000")
            .with_time_in_force(TimeInForce::GoodUntilCancelled)
            .with_allowed_status_codes([409]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "product_id": "BTC-USD",
                "side": "BUY",
                "client_order_id": "c-1",
                "type": "LIMIT",
                "base_quantity": "0.5",
                "limit_price": "60000",
                "time_in_force": "GOOD_UNTIL_CANCELLED"
            })
        );
    }

    #[test]
    fn test_create_order_generates_client_order_id() {
        let a = CreateOrderRequest::new("p1", "BTC-USD", OrderSide::Sell, OrderType::Market);
        let b = CreateOrderRequest::new("p1", "BTC-USD", OrderSide::Sell, OrderType::Market);
        assert!(uuid::Uuid::parse_str(&a.client_order_id).is_ok());
        assert_ne!(a.client_order_id, b.client_order_id);
    }

    #[test]
    fn test_order_preview_time_window() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap();
        let request = CreateOrderPreviewRequest::new("p1", "ETH-USD", OrderSide::Buy, OrderType::Twap)
            .with_quote_value("1000")
            .with_time_window(start, end);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["start_time"], "2024-03-01T12:00:00Z");
        assert_eq!(body["expiry_time"], "2024-03-01T13:00:00Z");
        assert_eq!(body["type"], "TWAP");
        assert!(body.get("client_order_id").is_none());
    }

    #[test]
    fn test_list_orders_query() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let request = ListOrdersRequest::new("p1")
            .with_order_statuses(["OPEN", "FILLED"])
            .with_product_ids(["BTC-USD"])
            .with_order_side(OrderSide::Sell)
            .with_date_range(start, None);

        assert_eq!(
            request.query().to_query_string(),
            "order_statuses=OPEN&order_statuses=FILLED&product_ids=BTC-USD\
             &order_side=SELL&start_date=2024-01-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn test_accept_quote_body_omits_unset_settlement() {
        let request = AcceptQuoteRequest::new("p1", "BTC-USD", OrderSide::Buy, "c-1", "q-1");
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("settl_currency").is_none());
        assert!(body.get("portfolio_id").is_none());
        assert_eq!(body["quote_id"], "q-1");
    }

    #[test]
    fn test_create_quote_body() {
        let request = CreateQuoteRequest::new("p1", "ETH-USD", OrderSide::Sell, "3000")
            .with_client_quote_id("q-1")
            .with_base_quantity("2");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "product_id": "ETH-USD",
                "side": "SELL",
                "client_quote_id": "q-1",
                "limit_price": "3000",
                "base_quantity": "2"
            })
        );
    }
}
