//! Prime REST API client implementation.
//!
//! The [`PrimeApiClient`] provides one async method per Prime endpoint. Every request is signed
//! with the client's [`Credentials`], and every accepted response body is hydrated into the
//! endpoint's response type.
//!
//! # Example
//!
//! ```rust,ignore
//! use prime_sdk::api::{GetOrderRequest, ListPortfoliosRequest, PrimeApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PrimeApiClient::from_env()?;
//!
//!     let portfolios = client.list_portfolios(ListPortfoliosRequest::new()).await?;
//!     for portfolio in portfolios.records("portfolios") {
//!         println!("{}", portfolio.str("name").unwrap_or_default());
//!     }
//!
//!     let order = client.get_order(GetOrderRequest::new("portfolio-id", "order-id")).await?;
//!     println!("{}", order);
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::types::*;
use crate::auth::Credentials;
use crate::hydrate::HydratedResponse;
use crate::network::DEFAULT_API_URL;
use crate::shared::{path_segment, PaginationParams, QueryParams};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed limit for paginated API requests.
const MAX_PAGINATION_LIMIT: u32 = 3000;

/// Deepest JSON nesting accepted in a response body.
const MAX_RESPONSE_DEPTH: usize = 1024;

/// Builder for configuring [`PrimeApiClient`].
#[derive(Debug, Clone)]
pub struct PrimeApiClientBuilder {
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
    credentials: Credentials,
}

impl PrimeApiClientBuilder {
    /// Create a new builder for the production API.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
            credentials,
        }
    }

    /// Override the base URL (must include the `/v1` prefix).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<PrimeApiClient> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            ApiError::InvalidParameter(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidParameter(format!(
                "Invalid base URL '{}'",
                self.base_url
            )));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in self.default_headers {
            let header_name = reqwest::header::HeaderName::try_from(name.as_str()).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = reqwest::header::HeaderValue::from_str(&value).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;

        Ok(PrimeApiClient {
            http_client,
            base_url: self.base_url,
            credentials: self.credentials,
        })
    }
}

/// Coinbase Prime REST API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PrimeApiClient {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
}

impl PrimeApiClient {
    /// Create a client for the production API with default settings.
    pub fn new(credentials: Credentials) -> ApiResult<Self> {
        PrimeApiClientBuilder::new(credentials).build()
    }

    /// Create a client from the `PRIME_CREDENTIALS` environment variable.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(credentials: Credentials) -> PrimeApiClientBuilder {
        PrimeApiClientBuilder::new(credentials)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credentials used to sign requests.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn get<T: HydratedResponse>(
        &self,
        path: &str,
        query: QueryParams,
        allowed_status_codes: &[u16],
    ) -> ApiResult<T> {
        self.send(Method::GET, path, &query, None, allowed_status_codes)
            .await
    }

    async fn post<T: HydratedResponse, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        allowed_status_codes: &[u16],
    ) -> ApiResult<T> {
        let body = Self::encode_body(body)?;
        self.send(Method::POST, path, &QueryParams::new(), Some(body), allowed_status_codes)
            .await
    }

    async fn put<T: HydratedResponse, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        allowed_status_codes: &[u16],
    ) -> ApiResult<T> {
        let body = Self::encode_body(body)?;
        self.send(Method::PUT, path, &QueryParams::new(), Some(body), allowed_status_codes)
            .await
    }

    async fn delete<T: HydratedResponse>(
        &self,
        path: &str,
        allowed_status_codes: &[u16],
    ) -> ApiResult<T> {
        self.send(Method::DELETE, path, &QueryParams::new(), None, allowed_status_codes)
            .await
    }

    fn encode_body<B: Serialize>(body: &B) -> ApiResult<String> {
        serde_json::to_string(body)
            .map_err(|e| ApiError::Deserialize(format!("Failed to serialize request body: {}", e)))
    }

    /// Build the request URL for `path` (relative to the base URL).
    fn url(&self, path: &str, query: &QueryParams) -> ApiResult<Url> {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        Url::parse(&url)
            .map_err(|e| ApiError::InvalidParameter(format!("Invalid request URL '{}': {}", url, e)))
    }

    /// Sign and send one request, then hydrate or map the response.
    async fn send<T: HydratedResponse>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<String>,
        allowed_status_codes: &[u16],
    ) -> ApiResult<T> {
        let url = self.url(path, query)?;
        let body_text = body.as_deref().unwrap_or("");
        let timestamp = chrono::Utc::now().timestamp();
        let auth = self
            .credentials
            .signed_headers(timestamp, method.as_str(), url.path(), body_text)?;

        let mut request = self.http_client.request(method.clone(), url.clone());
        for (name, value) in auth.iter() {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(method = %method, path = url.path(), status = status.as_u16(), "Prime API request");

        if status.is_success() || allowed_status_codes.contains(&status.as_u16()) {
            let text = response.text().await?;
            return Self::decode_body(&text);
        }

        Err(self.parse_error_response(response).await)
    }

    /// Decode an accepted response body; an empty body hydrates as `{}`.
    ///
    /// serde_json's default nesting limit of 128 is lifted. Bodies nested deeper than
    /// `MAX_RESPONSE_DEPTH` are rejected before parsing.
    fn decode_body<T: HydratedResponse>(text: &str) -> ApiResult<T> {
        if text.trim().is_empty() {
            return Ok(T::hydrate_raw(serde_json::Value::Object(serde_json::Map::new())));
        }

        let depth = json_depth(text);
        if depth > MAX_RESPONSE_DEPTH {
            return Err(ApiError::Deserialize(format!(
                "Response nesting depth {} exceeds {}",
                depth, MAX_RESPONSE_DEPTH
            )));
        }

        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let value = serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .and_then(|value| deserializer.end().map(|()| value))
            .map_err(|e| ApiError::Deserialize(format!("Failed to deserialize response: {}", e)))?;
        Ok(T::hydrate_raw(value))
    }

    /// Parse an error response into an ApiError.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let error_response = match response.text().await {
            Ok(text) => ErrorResponse::from_body(&text),
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                ErrorResponse::from_text(format!("HTTP {} (body unreadable: {})", status, e))
            }
        };

        Self::map_status_error(status, error_response)
    }

    /// Map HTTP status code to ApiError.
    fn map_status_error(status: StatusCode, response: ErrorResponse) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(response),
            StatusCode::NOT_FOUND => ApiError::NotFound(response),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(response),
            StatusCode::FORBIDDEN => ApiError::Forbidden(response),
            StatusCode::CONFLICT => ApiError::Conflict(response),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(response),
            _ if status.is_server_error() => ApiError::ServerError(response),
            _ => ApiError::UnexpectedStatus(status.as_u16(), response),
        }
    }

    // =========================================================================
    // Validation helpers
    // =========================================================================

    /// Validate that a required value is present.
    fn require(value: &str, field_name: &str) -> ApiResult<()> {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidParameter(format!("{} cannot be empty", field_name)));
        }
        Ok(())
    }

    /// Validate and percent-encode one path identifier.
    ///
    /// `.` and `..` survive percent-encoding and would be collapsed by URL normalization,
    /// sending the signed request to a different endpoint.
    fn path_id(value: &str, field_name: &str) -> ApiResult<String> {
        Self::require(value, field_name)?;
        if matches!(value.trim(), "." | "..") {
            return Err(ApiError::InvalidParameter(format!(
                "{} cannot be a relative path segment: '{}'",
                field_name, value
            )));
        }
        Ok(path_segment(value))
    }

    /// Validate that a limit is within bounds.
    fn validate_limit(limit: u32, max: u32) -> ApiResult<()> {
        if limit == 0 || limit > max {
            return Err(ApiError::InvalidParameter(format!("Limit must be 1-{}", max)));
        }
        Ok(())
    }

    fn validate_pagination(pagination: Option<&PaginationParams>) -> ApiResult<()> {
        match pagination.and_then(|p| p.limit) {
            Some(limit) => Self::validate_limit(limit, MAX_PAGINATION_LIMIT),
            None => Ok(()),
        }
    }

    fn portfolio_path(portfolio_id: &str, rest: &str) -> ApiResult<String> {
        let portfolio_id = Self::path_id(portfolio_id, "portfolio_id")?;
        Ok(format!("/portfolios/{}{}", portfolio_id, rest))
    }

    fn entity_path(entity_id: &str, rest: &str) -> ApiResult<String> {
        let entity_id = Self::path_id(entity_id, "entity_id")?;
        Ok(format!("/entities/{}{}", entity_id, rest))
    }

    fn wallet_path(portfolio_id: &str, wallet_id: &str, rest: &str) -> ApiResult<String> {
        let wallet_id = Self::path_id(wallet_id, "wallet_id")?;
        Self::portfolio_path(portfolio_id, &format!("/wallets/{}{}", wallet_id, rest))
    }

    fn segment(value: &str, field_name: &str) -> ApiResult<String> {
        Ok(format!("/{}", Self::path_id(value, field_name)?))
    }

    // =========================================================================
    // Portfolio endpoints
    // =========================================================================

    /// List all portfolios the API key can access.
    pub async fn list_portfolios(
        &self,
        request: ListPortfoliosRequest,
    ) -> ApiResult<ListPortfoliosResponse> {
        self.get("/portfolios", QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get a portfolio by id.
    pub async fn get_portfolio(&self, request: GetPortfolioRequest) -> ApiResult<GetPortfolioResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get buying power for a currency pair.
    pub async fn get_portfolio_buying_power(
        &self,
        request: GetPortfolioBuyingPowerRequest,
    ) -> ApiResult<GetPortfolioBuyingPowerResponse> {
        Self::require(&request.base_currency, "base_currency")?;
        Self::require(&request.quote_currency, "quote_currency")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/buying_power")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Get the portfolio's commission schedule.
    pub async fn get_portfolio_commission(
        &self,
        request: GetPortfolioCommissionRequest,
    ) -> ApiResult<GetPortfolioCommissionResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/commission")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get post-trade credit information.
    pub async fn get_portfolio_credit_information(
        &self,
        request: GetPortfolioCreditInformationRequest,
    ) -> ApiResult<GetPortfolioCreditInformationResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/credit")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get the withdrawal power for one symbol.
    pub async fn get_portfolio_withdrawal_power(
        &self,
        request: GetPortfolioWithdrawalPowerRequest,
    ) -> ApiResult<GetPortfolioWithdrawalPowerResponse> {
        Self::require(&request.symbol, "symbol")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/withdrawal_power")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Get trade finance tiered pricing fees.
    pub async fn get_trade_finance_tiered_pricing_fees(
        &self,
        request: GetTradeFinanceTieredPricingFeesRequest,
    ) -> ApiResult<GetTradeFinanceTieredPricingFeesResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/tf_tiered_fees")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List users with access to a portfolio.
    pub async fn list_portfolio_users(
        &self,
        request: ListPortfolioUsersRequest,
    ) -> ApiResult<ListPortfolioUsersResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/users")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List balances in a portfolio.
    pub async fn list_portfolio_balances(
        &self,
        request: ListPortfolioBalancesRequest,
    ) -> ApiResult<ListPortfolioBalancesResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/balances")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List interest accruals for a portfolio.
    pub async fn list_interest_accruals_for_portfolio(
        &self,
        request: ListInterestAccrualsForPortfolioRequest,
    ) -> ApiResult<ListInterestAccrualsForPortfolioResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/accruals")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List margin conversions for a portfolio.
    pub async fn list_margin_conversions(
        &self,
        request: ListMarginConversionsRequest,
    ) -> ApiResult<ListMarginConversionsResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/margin_conversions")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List locates previously created for a portfolio.
    pub async fn list_existing_locates(
        &self,
        request: ListExistingLocatesRequest,
    ) -> ApiResult<ListExistingLocatesResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/locates")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Create a short-sale locate.
    pub async fn create_new_locate(
        &self,
        request: CreateNewLocateRequest,
    ) -> ApiResult<CreateNewLocateResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/locates")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Order endpoints
    // =========================================================================

    /// Submit an order.
    pub async fn create_order(&self, request: CreateOrderRequest) -> ApiResult<CreateOrderResponse> {
        Self::require(&request.product_id, "product_id")?;
        Self::require(&request.client_order_id, "client_order_id")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/order")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Preview an order without submitting it.
    pub async fn create_order_preview(
        &self,
        request: CreateOrderPreviewRequest,
    ) -> ApiResult<CreateOrderPreviewResponse> {
        Self::require(&request.product_id, "product_id")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/order_preview")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Request an RFQ quote.
    pub async fn create_quote(&self, request: CreateQuoteRequest) -> ApiResult<CreateQuoteResponse> {
        Self::require(&request.product_id, "product_id")?;
        Self::require(&request.client_quote_id, "client_quote_id")?;
        Self::require(&request.limit_price, "limit_price")?;
        if request.base_quantity.is_none() == request.quote_value.is_none() {
            return Err(ApiError::InvalidParameter(
                "exactly one of base_quantity or quote_value is required".to_string(),
            ));
        }
        let path = Self::portfolio_path(&request.portfolio_id, "/rfq")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Accept an RFQ quote.
    pub async fn accept_quote(&self, request: AcceptQuoteRequest) -> ApiResult<AcceptQuoteResponse> {
        Self::require(&request.quote_id, "quote_id")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/accept_quote")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Cancel an open order.
    pub async fn cancel_order(&self, request: CancelOrderRequest) -> ApiResult<CancelOrderResponse> {
        let rest = format!("/orders{}/cancel", Self::segment(&request.order_id, "order_id")?);
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.post(&path, &serde_json::json!({}), &request.allowed_status_codes)
            .await
    }

    /// Get an order by id.
    pub async fn get_order(&self, request: GetOrderRequest) -> ApiResult<GetOrderResponse> {
        let rest = format!("/orders{}", Self::segment(&request.order_id, "order_id")?);
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List orders matching the given filters.
    pub async fn list_orders(&self, request: ListOrdersRequest) -> ApiResult<ListOrdersResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/orders")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List open orders.
    pub async fn list_open_orders(
        &self,
        request: ListOpenOrdersRequest,
    ) -> ApiResult<ListOpenOrdersResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/open_orders")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List the fills of one order.
    pub async fn list_order_fills(
        &self,
        request: ListOrderFillsRequest,
    ) -> ApiResult<ListOrderFillsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let rest = format!("/orders{}/fills", Self::segment(&request.order_id, "order_id")?);
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List fills across a portfolio.
    pub async fn list_portfolio_fills(
        &self,
        request: ListPortfolioFillsRequest,
    ) -> ApiResult<ListPortfolioFillsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/fills")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List tradable products.
    pub async fn list_products(&self, request: ListProductsRequest) -> ApiResult<ListProductsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/products")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Allocation endpoints
    // =========================================================================

    /// Allocate an executed order across portfolios.
    pub async fn create_portfolio_allocations(
        &self,
        request: CreatePortfolioAllocationsRequest,
    ) -> ApiResult<CreatePortfolioAllocationsResponse> {
        Self::require(&request.source_portfolio_id, "source_portfolio_id")?;
        let request = request.normalized();
        self.post("/allocations", &request, &request.allowed_status_codes)
            .await
    }

    /// Create a net allocation.
    pub async fn create_portfolio_net_allocations(
        &self,
        request: CreatePortfolioNetAllocationsRequest,
    ) -> ApiResult<CreatePortfolioNetAllocationsResponse> {
        Self::require(&request.source_portfolio_id, "source_portfolio_id")?;
        let request = request.normalized();
        self.post("/allocations/net", &request, &request.allowed_status_codes)
            .await
    }

    /// Get an allocation by id.
    pub async fn get_allocation_by_id(
        &self,
        request: GetAllocationByIdRequest,
    ) -> ApiResult<GetAllocationByIdResponse> {
        let rest = format!("/allocations{}", Self::segment(&request.allocation_id, "allocation_id")?);
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get the allocations of one net allocation.
    pub async fn get_net_allocations_by_netting_id(
        &self,
        request: GetNetAllocationsByNettingIdRequest,
    ) -> ApiResult<GetNetAllocationsByNettingIdResponse> {
        let rest = format!("/allocations/net{}", Self::segment(&request.netting_id, "netting_id")?);
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List allocations for a portfolio.
    pub async fn list_portfolio_allocations(
        &self,
        request: ListPortfolioAllocationsRequest,
    ) -> ApiResult<ListPortfolioAllocationsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/allocations")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Wallet endpoints
    // =========================================================================

    /// Create a wallet.
    pub async fn create_wallet(&self, request: CreateWalletRequest) -> ApiResult<CreateWalletResponse> {
        Self::require(&request.name, "name")?;
        Self::require(&request.symbol, "symbol")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/wallets")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Get a wallet by id.
    pub async fn get_wallet(&self, request: GetWalletRequest) -> ApiResult<GetWalletResponse> {
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List wallets in a portfolio.
    pub async fn list_wallets(&self, request: ListWalletsRequest) -> ApiResult<ListWalletsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/wallets")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Get a wallet's balance.
    pub async fn get_wallet_balance(
        &self,
        request: GetWalletBalanceRequest,
    ) -> ApiResult<GetWalletBalanceResponse> {
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/balance")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get deposit instructions for a wallet.
    pub async fn get_wallet_deposit_instructions(
        &self,
        request: GetWalletDepositInstructionsRequest,
    ) -> ApiResult<GetWalletDepositInstructionsResponse> {
        let path = Self::wallet_path(
            &request.portfolio_id,
            &request.wallet_id,
            "/deposit_instructions",
        )?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Create a new deposit address for a wallet.
    pub async fn create_wallet_address(
        &self,
        request: CreateWalletAddressRequest,
    ) -> ApiResult<CreateWalletAddressResponse> {
        Self::require(&request.network_id, "network_id")?;
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/addresses")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// List a wallet's addresses on one network.
    pub async fn list_wallet_addresses(
        &self,
        request: ListWalletAddressesRequest,
    ) -> ApiResult<ListWalletAddressesResponse> {
        Self::require(&request.network_id, "network_id")?;
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/addresses")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List onchain and DeFi balances of a web3 wallet.
    pub async fn list_web3_wallet_balances(
        &self,
        request: ListWeb3WalletBalancesRequest,
    ) -> ApiResult<ListWeb3WalletBalancesResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/web3_balances")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Request to stake or delegate a wallet's funds.
    pub async fn request_to_stake_or_delegate(
        &self,
        request: RequestToStakeOrDelegateRequest,
    ) -> ApiResult<RequestToStakeOrDelegateResponse> {
        Self::require(&request.idempotency_key, "idempotency_key")?;
        let path = Self::wallet_path(
            &request.portfolio_id,
            &request.wallet_id,
            "/staking/initiate",
        )?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Stake a wallet's funds.
    pub async fn create_stake(&self, request: CreateStakeRequest) -> ApiResult<CreateStakeResponse> {
        Self::require(&request.idempotency_key, "idempotency_key")?;
        let path = Self::wallet_path(
            &request.portfolio_id,
            &request.wallet_id,
            "/staking/initiate",
        )?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Unstake a wallet's funds.
    pub async fn create_unstake(
        &self,
        request: CreateUnstakeRequest,
    ) -> ApiResult<CreateUnstakeResponse> {
        Self::require(&request.idempotency_key, "idempotency_key")?;
        let path = Self::wallet_path(
            &request.portfolio_id,
            &request.wallet_id,
            "/staking/unstake",
        )?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Submit a raw unsigned onchain transaction for signing.
    pub async fn create_onchain_transaction(
        &self,
        request: CreateOnchainTransactionRequest,
    ) -> ApiResult<CreateOnchainTransactionResponse> {
        Self::require(&request.raw_unsigned_txn, "raw_unsigned_txn")?;
        let path = Self::wallet_path(
            &request.portfolio_id,
            &request.wallet_id,
            "/onchain_transaction",
        )?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Transaction endpoints
    // =========================================================================

    /// Get a transaction by id.
    pub async fn get_transaction(
        &self,
        request: GetTransactionRequest,
    ) -> ApiResult<GetTransactionResponse> {
        let rest = format!(
            "/transactions{}",
            Self::segment(&request.transaction_id, "transaction_id")?
        );
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List transactions across a portfolio.
    pub async fn list_portfolio_transactions(
        &self,
        request: ListPortfolioTransactionsRequest,
    ) -> ApiResult<ListPortfolioTransactionsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/transactions")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List transactions of one wallet.
    pub async fn list_wallet_transactions(
        &self,
        request: ListWalletTransactionsRequest,
    ) -> ApiResult<ListWalletTransactionsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/transactions")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Transfer funds between wallets.
    pub async fn create_transfer(
        &self,
        request: CreateTransferRequest,
    ) -> ApiResult<CreateTransferResponse> {
        Self::require(&request.destination, "destination")?;
        Self::require(&request.idempotency_key, "idempotency_key")?;
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/transfers")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Convert between a stablecoin and its fiat counterpart within a wallet.
    pub async fn create_conversion(
        &self,
        request: CreateConversionRequest,
    ) -> ApiResult<CreateConversionResponse> {
        Self::require(&request.destination, "destination")?;
        Self::require(&request.idempotency_key, "idempotency_key")?;
        Self::require(&request.source_symbol, "source_symbol")?;
        Self::require(&request.destination_symbol, "destination_symbol")?;
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/conversion")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Withdraw funds to an external address or payment method.
    pub async fn create_withdrawal(
        &self,
        request: CreateWithdrawalRequest,
    ) -> ApiResult<CreateWithdrawalResponse> {
        Self::require(&request.idempotency_key, "idempotency_key")?;
        if request.payment_method.is_none() && request.blockchain_address.is_none() {
            return Err(ApiError::InvalidParameter(
                "either payment_method or blockchain_address is required".to_string(),
            ));
        }
        let path = Self::wallet_path(&request.portfolio_id, &request.wallet_id, "/withdrawals")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Activity endpoints
    // =========================================================================

    /// Get a portfolio activity by id.
    pub async fn get_activity(&self, request: GetActivityRequest) -> ApiResult<GetActivityResponse> {
        let rest = format!("/activities{}", Self::segment(&request.activity_id, "activity_id")?);
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List activities of a portfolio.
    pub async fn list_activities(
        &self,
        request: ListActivitiesRequest,
    ) -> ApiResult<ListActivitiesResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/activities")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Get an entity activity by id.
    pub async fn get_entity_activity(
        &self,
        request: GetEntityActivityRequest,
    ) -> ApiResult<GetEntityActivityResponse> {
        let rest = format!("/activities{}", Self::segment(&request.activity_id, "activity_id")?);
        let path = Self::entity_path(&request.entity_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List activities of an entity.
    pub async fn list_entity_activities(
        &self,
        request: ListEntityActivitiesRequest,
    ) -> ApiResult<ListEntityActivitiesResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::entity_path(&request.entity_id, "/activities")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Address book endpoints
    // =========================================================================

    /// Get the portfolio's address book.
    pub async fn get_address_book(
        &self,
        request: GetAddressBookRequest,
    ) -> ApiResult<GetAddressBookResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::portfolio_path(&request.portfolio_id, "/address_book")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Propose a new address book entry.
    pub async fn create_address_book_entry(
        &self,
        request: CreateAddressBookEntryRequest,
    ) -> ApiResult<CreateAddressBookEntryResponse> {
        Self::require(&request.address, "address")?;
        Self::require(&request.currency_symbol, "currency_symbol")?;
        let path = Self::portfolio_path(&request.portfolio_id, "/address_book")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Propose a new onchain address group.
    pub async fn create_onchain_address_book_entry(
        &self,
        request: CreateOnchainAddressBookEntryRequest,
    ) -> ApiResult<CreateOnchainAddressBookEntryResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/onchain_address_group")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Propose changes to an existing onchain address group.
    pub async fn update_onchain_address_book(
        &self,
        request: UpdateOnchainAddressBookRequest,
    ) -> ApiResult<UpdateOnchainAddressBookResponse> {
        Self::require(
            request.address_group.id.as_deref().unwrap_or_default(),
            "address_group.id",
        )?;
        let path = Self::portfolio_path(&request.portfolio_id, "/onchain_address_group")?;
        self.put(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Propose deleting an onchain address group.
    pub async fn delete_onchain_address_group(
        &self,
        request: DeleteOnchainAddressGroupRequest,
    ) -> ApiResult<DeleteOnchainAddressGroupResponse> {
        let rest = format!(
            "/onchain_address_group{}",
            Self::segment(&request.address_group_id, "address_group_id")?
        );
        let path = Self::portfolio_path(&request.portfolio_id, &rest)?;
        self.delete(&path, &request.allowed_status_codes).await
    }

    /// List onchain address groups.
    pub async fn list_onchain_address_groups(
        &self,
        request: ListOnchainAddressGroupsRequest,
    ) -> ApiResult<ListOnchainAddressGroupsResponse> {
        let path = Self::portfolio_path(&request.portfolio_id, "/onchain_address_groups")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Entity endpoints
    // =========================================================================

    /// List assets supported for an entity.
    pub async fn list_assets(&self, request: ListAssetsRequest) -> ApiResult<ListAssetsResponse> {
        let path = Self::entity_path(&request.entity_id, "/assets")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List balances aggregated across an entity.
    pub async fn list_entity_balances(
        &self,
        request: ListEntityBalancesRequest,
    ) -> ApiResult<ListEntityBalancesResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::entity_path(&request.entity_id, "/balances")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List users of an entity.
    pub async fn list_users(&self, request: ListUsersRequest) -> ApiResult<ListUsersResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::entity_path(&request.entity_id, "/users")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List payment methods of an entity.
    pub async fn list_entity_payment_methods(
        &self,
        request: ListEntityPaymentMethodsRequest,
    ) -> ApiResult<ListEntityPaymentMethodsResponse> {
        let path = Self::entity_path(&request.entity_id, "/payment-methods")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get one payment method.
    pub async fn get_entity_payment_method(
        &self,
        request: GetEntityPaymentMethodRequest,
    ) -> ApiResult<GetEntityPaymentMethodResponse> {
        let rest = format!(
            "/payment-methods{}",
            Self::segment(&request.payment_method_id, "payment_method_id")?
        );
        let path = Self::entity_path(&request.entity_id, &rest)?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List invoices of an entity.
    pub async fn list_invoices(&self, request: ListInvoicesRequest) -> ApiResult<ListInvoicesResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::entity_path(&request.entity_id, "/invoices")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List financing positions aggregated across an entity.
    pub async fn list_aggregate_entity_positions(
        &self,
        request: ListAggregateEntityPositionsRequest,
    ) -> ApiResult<ListAggregateEntityPositionsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::entity_path(&request.entity_id, "/aggregate_positions")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Get locate availabilities for an entity.
    pub async fn get_entity_locate_availabilities(
        &self,
        request: GetEntityLocateAvailabilitiesRequest,
    ) -> ApiResult<GetEntityLocateAvailabilitiesResponse> {
        let path = Self::entity_path(&request.entity_id, "/locates_availability")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List margin call summaries of an entity.
    pub async fn list_margin_call_summaries(
        &self,
        request: ListMarginCallSummariesRequest,
    ) -> ApiResult<ListMarginCallSummariesResponse> {
        let path = Self::entity_path(&request.entity_id, "/margin_summaries")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List financing positions held by an entity.
    pub async fn list_entity_positions(
        &self,
        request: ListEntityPositionsRequest,
    ) -> ApiResult<ListEntityPositionsResponse> {
        Self::validate_pagination(request.pagination.as_ref())?;
        let path = Self::entity_path(&request.entity_id, "/positions")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// Get margin call records and the current margin summary of an entity.
    pub async fn get_margin_information(
        &self,
        request: GetMarginInformationRequest,
    ) -> ApiResult<GetMarginInformationResponse> {
        let path = Self::entity_path(&request.entity_id, "/margin")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// List interest accruals across an entity's portfolios.
    pub async fn list_interest_accruals(
        &self,
        request: ListInterestAccrualsRequest,
    ) -> ApiResult<ListInterestAccrualsResponse> {
        if let Some(portfolio_id) = &request.portfolio_id {
            Self::require(portfolio_id, "portfolio_id")?;
        }
        let path = Self::entity_path(&request.entity_id, "/accruals")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    // =========================================================================
    // Futures endpoints
    // =========================================================================

    /// Get the entity's FCM balance summary.
    pub async fn get_entity_fcm_balance(
        &self,
        request: GetEntityFcmBalanceRequest,
    ) -> ApiResult<GetEntityFcmBalanceResponse> {
        let path = Self::entity_path(&request.entity_id, "/futures/balance_summary")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Get the entity's futures positions.
    pub async fn get_entity_positions(
        &self,
        request: GetEntityPositionsRequest,
    ) -> ApiResult<GetEntityPositionsResponse> {
        let path = Self::entity_path(&request.entity_id, "/futures/positions")?;
        self.get(&path, request.query(), &request.allowed_status_codes)
            .await
    }

    /// List pending and processed futures sweeps.
    pub async fn list_entity_futures_sweeps(
        &self,
        request: ListEntityFuturesSweepsRequest,
    ) -> ApiResult<ListEntityFuturesSweepsResponse> {
        let path = Self::entity_path(&request.entity_id, "/futures/sweeps")?;
        self.get(&path, QueryParams::new(), &request.allowed_status_codes)
            .await
    }

    /// Schedule a futures sweep.
    pub async fn schedule_entity_futures_sweep(
        &self,
        request: ScheduleEntityFuturesSweepRequest,
    ) -> ApiResult<ScheduleEntityFuturesSweepResponse> {
        Self::require(&request.amount, "amount")?;
        Self::require(&request.currency, "currency")?;
        let path = Self::entity_path(&request.entity_id, "/futures/sweeps")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }

    /// Cancel the pending futures sweep.
    pub async fn cancel_entity_futures_sweep(
        &self,
        request: CancelEntityFuturesSweepRequest,
    ) -> ApiResult<CancelEntityFuturesSweepResponse> {
        let path = Self::entity_path(&request.entity_id, "/futures/sweeps")?;
        self.delete(&path, &request.allowed_status_codes).await
    }

    /// Enable or disable automatic futures sweeps.
    pub async fn set_auto_sweep(&self, request: SetAutoSweepRequest) -> ApiResult<SetAutoSweepResponse> {
        let path = Self::entity_path(&request.entity_id, "/futures/auto_sweep")?;
        self.post(&path, &request, &request.allowed_status_codes)
            .await
    }
}

/// Maximum bracket nesting of a JSON text, ignoring brackets inside strings.
fn json_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}
