//! Portfolio, balance and financing types for the Prime REST API.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{BalanceType, PaginationParams, QueryParams};

lazy_static! {
    static ref LIST_PORTFOLIOS: Schema = Schema::builder("ListPortfoliosResponse")
        .list_of_structured("portfolios", &PORTFOLIO)
        .build();
    static ref GET_PORTFOLIO: Schema = Schema::builder("GetPortfolioResponse")
        .structured("portfolio", &PORTFOLIO)
        .build();
    static ref GET_PORTFOLIO_BUYING_POWER: Schema = Schema::builder("GetPortfolioBuyingPowerResponse")
        .structured("buying_power", &BUYING_POWER)
        .build();
    static ref GET_PORTFOLIO_COMMISSION: Schema = Schema::builder("GetPortfolioCommissionResponse")
        .structured("commission", &COMMISSION)
        .build();
    static ref GET_PORTFOLIO_CREDIT_INFORMATION: Schema =
        Schema::builder("GetPortfolioCreditInformationResponse")
            .structured("post_trade_credit", &POST_TRADE_CREDIT)
            .build();
    static ref GET_PORTFOLIO_WITHDRAWAL_POWER: Schema =
        Schema::builder("GetPortfolioWithdrawalPowerResponse")
            .structured("withdrawal_power", &WITHDRAWAL_POWER)
            .build();
    static ref GET_TRADE_FINANCE_TIERED_PRICING_FEES: Schema =
        Schema::builder("GetTradeFinanceTieredPricingFeesResponse")
            .list_of_structured("fees", &TIERED_FEE)
            .build();
    static ref LIST_PORTFOLIO_USERS: Schema = Schema::builder("ListPortfolioUsersResponse")
        .list_of_structured("users", &PORTFOLIO_USER)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_PORTFOLIO_BALANCES: Schema = Schema::builder("ListPortfolioBalancesResponse")
        .list_of_structured("balances", &BALANCE)
        .primitive("type")
        .structured("trading_balances", &BALANCE_WITH_HOLDS)
        .structured("vault_balances", &BALANCE_WITH_HOLDS)
        .structured("prime_custody_balances", &BALANCE_WITH_HOLDS)
        .build();
    static ref LIST_INTEREST_ACCRUALS_FOR_PORTFOLIO: Schema =
        Schema::builder("ListInterestAccrualsForPortfolioResponse")
            .primitive("total_notional_accrual")
            .list_of_structured("accruals", &ACCRUAL)
            .build();
    static ref LIST_MARGIN_CONVERSIONS: Schema = Schema::builder("ListMarginConversionsResponse")
        .list_of_structured("conversions", &MARGIN_CONVERSION)
        .build();
    static ref LIST_EXISTING_LOCATES: Schema = Schema::builder("ListExistingLocatesResponse")
        .list_of_structured("locates", &EXISTING_LOCATE)
        .build();
    static ref CREATE_NEW_LOCATE: Schema = Schema::builder("CreateNewLocateResponse")
        .primitive("locate_id")
        .build();
}

hydrated_response! {
    /// Response for GET /portfolios.
    ListPortfoliosResponse => LIST_PORTFOLIOS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}.
    GetPortfolioResponse => GET_PORTFOLIO
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/buying_power.
    GetPortfolioBuyingPowerResponse => GET_PORTFOLIO_BUYING_POWER
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/commission.
    GetPortfolioCommissionResponse => GET_PORTFOLIO_COMMISSION
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/credit.
    GetPortfolioCreditInformationResponse => GET_PORTFOLIO_CREDIT_INFORMATION
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/withdrawal_power.
    GetPortfolioWithdrawalPowerResponse => GET_PORTFOLIO_WITHDRAWAL_POWER
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/tf_tiered_fees.
    GetTradeFinanceTieredPricingFeesResponse => GET_TRADE_FINANCE_TIERED_PRICING_FEES
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/users.
    ListPortfolioUsersResponse => LIST_PORTFOLIO_USERS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/balances.
    ListPortfolioBalancesResponse => LIST_PORTFOLIO_BALANCES
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/accruals.
    ListInterestAccrualsForPortfolioResponse => LIST_INTEREST_ACCRUALS_FOR_PORTFOLIO
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/margin_conversions.
    ListMarginConversionsResponse => LIST_MARGIN_CONVERSIONS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/locates.
    ListExistingLocatesResponse => LIST_EXISTING_LOCATES
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/locates.
    CreateNewLocateResponse => CREATE_NEW_LOCATE
}

/// Request for GET /portfolios.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPortfoliosRequest {
    pub allowed_status_codes: Vec<u16>,
}

impl ListPortfoliosRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Request for GET /portfolios/{portfolio_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetPortfolioRequest {
    pub portfolio_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetPortfolioRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/buying_power.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetPortfolioBuyingPowerRequest {
    pub portfolio_id: String,
    /// Currency being bought or sold
    pub base_currency: String,
    /// Currency used to pay
    pub quote_currency: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetPortfolioBuyingPowerRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        base_currency: impl Into<String>,
        quote_currency: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            base_currency: base_currency.into(),
            quote_currency: quote_currency.into(),
            ..Default::default()
        }
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .param("base_currency", &self.base_currency)
            .param("quote_currency", &self.quote_currency)
    }
}

/// Request for GET /portfolios/{portfolio_id}/commission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetPortfolioCommissionRequest {
    pub portfolio_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetPortfolioCommissionRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/credit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetPortfolioCreditInformationRequest {
    pub portfolio_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetPortfolioCreditInformationRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/withdrawal_power.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetPortfolioWithdrawalPowerRequest {
    pub portfolio_id: String,
    pub symbol: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetPortfolioWithdrawalPowerRequest {
    pub fn new(portfolio_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new().param("symbol", &self.symbol)
    }
}

/// Request for GET /portfolios/{portfolio_id}/tf_tiered_fees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTradeFinanceTieredPricingFeesRequest {
    pub portfolio_id: String,
    /// Fee schedule in effect at this time (defaults to now)
    pub effective_at: Option<DateTime<Utc>>,
    pub allowed_status_codes: Vec<u16>,
}

impl GetTradeFinanceTieredPricingFeesRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_effective_at(mut self, effective_at: DateTime<Utc>) -> Self {
        self.effective_at = Some(effective_at);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new().datetime("effective_at", self.effective_at.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPortfolioUsersRequest {
    pub portfolio_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListPortfolioUsersRequest {
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

/// Request for GET /portfolios/{portfolio_id}/balances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPortfolioBalancesRequest {
    pub portfolio_id: String,
    /// Restrict to these symbols
    pub symbols: Vec<String>,
    pub balance_type: Option<BalanceType>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListPortfolioBalancesRequest {
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

    pub fn with_balance_type(mut self, balance_type: BalanceType) -> Self {
        self.balance_type = Some(balance_type);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("symbols", &self.symbols)
            .opt("balance_type", self.balance_type)
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/accruals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListInterestAccrualsForPortfolioRequest {
    pub portfolio_id: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListInterestAccrualsForPortfolioRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .datetime("start_date", self.start_date.as_ref())
            .datetime("end_date", self.end_date.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/margin_conversions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListMarginConversionsRequest {
    pub portfolio_id: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListMarginConversionsRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .datetime("start_date", self.start_date.as_ref())
            .datetime("end_date", self.end_date.as_ref())
    }
}

/// Request for GET /portfolios/{portfolio_id}/locates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListExistingLocatesRequest {
    pub portfolio_id: String,
    pub locate_ids: Vec<String>,
    /// `YYYY-MM-DD`
    pub locate_date: Option<String>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListExistingLocatesRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_locate_ids<I, S>(mut self, locate_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locate_ids = locate_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locate_date(mut self, locate_date: impl Into<String>) -> Self {
        self.locate_date = Some(locate_date.into());
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("locate_ids", &self.locate_ids)
            .opt("locate_date", self.locate_date.as_deref())
    }
}

/// Request for POST /portfolios/{portfolio_id}/locates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateNewLocateRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub symbol: String,
    /// Quantity to locate as decimal string
    pub amount: String,
    /// Locate date (`YYYY-MM-DD`)
    pub locate_date: String,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateNewLocateRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        symbol: impl Into<String>,
        amount: impl Into<String>,
        locate_date: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            symbol: symbol.into(),
            amount: amount.into(),
            locate_date: locate_date.into(),
            ..Default::default()
        }
    }
}

allowed_status_codes!(
    ListPortfoliosRequest,
    GetPortfolioRequest,
    GetPortfolioBuyingPowerRequest,
    GetPortfolioCommissionRequest,
    GetPortfolioCreditInformationRequest,
    GetPortfolioWithdrawalPowerRequest,
    GetTradeFinanceTieredPricingFeesRequest,
    ListPortfolioUsersRequest,
    ListPortfolioBalancesRequest,
    ListInterestAccrualsForPortfolioRequest,
    ListMarginConversionsRequest,
    ListExistingLocatesRequest,
    CreateNewLocateRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_list_portfolio_balances_query() {
        let request = ListPortfolioBalancesRequest::new("p1")
            .with_symbols(["BTC", "ETH"])
            .with_balance_type(BalanceType::Trading)
            .with_pagination(PaginationParams::new().with_limit(10));

        assert_eq!(
            request.query().to_query_string(),
            "symbols=BTC&symbols=ETH&balance_type=TRADING_BALANCES&limit=10"
        );
        assert!(ListPortfolioBalancesRequest::new("p1").query().is_empty());
    }

    #[test]
    fn test_accrual_date_range_query() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let request = ListInterestAccrualsForPortfolioRequest::new("p1").with_date_range(start, end);

        let pairs = request.query();
        assert_eq!(pairs.pairs()[0], ("start_date".to_string(), "2024-01-01T00:00:00Z".to_string()));
        assert_eq!(pairs.pairs()[1], ("end_date".to_string(), "2024-02-01T00:00:00Z".to_string()));
    }

    #[test]
    fn test_create_new_locate_body_omits_path_and_status_codes() {
        let request = CreateNewLocateRequest::new("p1", "BTC", "1.5", "2024-06-01")
            .with_allowed_status_codes([409]);

        assert_eq!(request.allowed_status_codes, vec![409]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"symbol": "BTC", "amount": "1.5", "locate_date": "2024-06-01"})
        );
    }

    #[test]
    fn test_existing_locates_query() {
        let request = ListExistingLocatesRequest::new("p1")
            .with_locate_ids(["l-1", "l-2"])
            .with_locate_date("2024-06-01");

        assert_eq!(
            request.query().to_query_string(),
            "locate_ids=l-1&locate_ids=l-2&locate_date=2024-06-01"
        );
    }

    #[test]
    fn test_balances_response_hydrates_holds() {
        let response = ListPortfolioBalancesResponse::from_value(json!({
            "balances": [{"symbol": "BTC", "amount": "2", "holds": "0.5"}],
            "type": "TRADING_BALANCES",
            "trading_balances": {"total": "100", "holds": "5"}
        }));

        assert_eq!(response.records("balances")[0].str("holds"), Some("0.5"));
        assert_eq!(
            response.record("trading_balances").and_then(|b| b.str("total")),
            Some("100")
        );
        assert!(!response.is_present("vault_balances"));
    }
}
