//! Entity-scoped types for the Prime REST API: assets, balances, users, payment methods,
//! invoices and financing.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{AggregationType, PaginationParams, QueryParams};

lazy_static! {
    static ref LIST_ASSETS: Schema = Schema::builder("ListAssetsResponse")
        .list_of_structured("assets", &ASSET)
        .build();
    static ref LIST_ENTITY_BALANCES: Schema = Schema::builder("ListEntityBalancesResponse")
        .list_of_structured("balances", &BALANCE)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_USERS: Schema = Schema::builder("ListUsersResponse")
        .list_of_structured("users", &USER)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_ENTITY_PAYMENT_METHODS: Schema =
        Schema::builder("ListEntityPaymentMethodsResponse")
            .list_of_structured("payment_methods", &PAYMENT_METHOD_DETAILS)
            .build();
    static ref GET_ENTITY_PAYMENT_METHOD: Schema = Schema::builder("GetEntityPaymentMethodResponse")
        .structured("details", &PAYMENT_METHOD_DETAILS)
        .build();
    static ref LIST_INVOICES: Schema = Schema::builder("ListInvoicesResponse")
        .list_of_structured("invoices", &INVOICE)
        .structured("pagination", &PAGINATION)
        .build();
    static ref LIST_AGGREGATE_ENTITY_POSITIONS: Schema =
        Schema::builder("ListAggregateEntityPositionsResponse")
            .list_of_structured("positions", &POSITION)
            .structured("pagination", &PAGINATION)
            .build();
    static ref GET_ENTITY_LOCATE_AVAILABILITIES: Schema =
        Schema::builder("GetEntityLocateAvailabilitiesResponse")
            .list_of_structured("locates", &LOCATE_AVAILABILITY)
            .build();
    static ref LIST_ENTITY_POSITIONS: Schema = Schema::builder("ListEntityPositionsResponse")
        .list_of_structured("positions", &ENTITY_POSITION)
        .structured("pagination", &PAGINATION)
        .build();
    static ref GET_MARGIN_INFORMATION: Schema = Schema::builder("GetMarginInformationResponse")
        .structured("margin_information", &MARGIN_INFORMATION)
        .build();
    static ref LIST_INTEREST_ACCRUALS: Schema = Schema::builder("ListInterestAccrualsResponse")
        .list_of_structured("accruals", &ACCRUAL)
        .build();
    static ref LIST_MARGIN_CALL_SUMMARIES: Schema = Schema::builder("ListMarginCallSummariesResponse")
        .list_of_structured("margin_summaries", &MARGIN_SUMMARY)
        .build();
}

hydrated_response! {
    /// Response for GET /entities/{entity_id}/assets.
    ListAssetsResponse => LIST_ASSETS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/balances.
    ListEntityBalancesResponse => LIST_ENTITY_BALANCES
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/users.
    ListUsersResponse => LIST_USERS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/payment-methods.
    ListEntityPaymentMethodsResponse => LIST_ENTITY_PAYMENT_METHODS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/payment-methods/{payment_method_id}.
    GetEntityPaymentMethodResponse => GET_ENTITY_PAYMENT_METHOD
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/invoices.
    ListInvoicesResponse => LIST_INVOICES
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/aggregate_positions.
    ListAggregateEntityPositionsResponse => LIST_AGGREGATE_ENTITY_POSITIONS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/locates_availability.
    GetEntityLocateAvailabilitiesResponse => GET_ENTITY_LOCATE_AVAILABILITIES
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/positions.
    ListEntityPositionsResponse => LIST_ENTITY_POSITIONS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/margin.
    GetMarginInformationResponse => GET_MARGIN_INFORMATION
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/accruals.
    ListInterestAccrualsResponse => LIST_INTEREST_ACCRUALS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/margin_summaries.
    ListMarginCallSummariesResponse => LIST_MARGIN_CALL_SUMMARIES
}

/// Request for GET /entities/{entity_id}/assets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAssetsRequest {
    pub entity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl ListAssetsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /entities/{entity_id}/balances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntityBalancesRequest {
    pub entity_id: String,
    pub symbols: Vec<String>,
    pub aggregation_type: Option<AggregationType>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListEntityBalancesRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
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

    pub fn with_aggregation_type(mut self, aggregation_type: AggregationType) -> Self {
        self.aggregation_type = Some(aggregation_type);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("symbols", &self.symbols)
            .opt("aggregation_type", self.aggregation_type)
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /entities/{entity_id}/users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUsersRequest {
    pub entity_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListUsersRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
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

/// Request for GET /entities/{entity_id}/payment-methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntityPaymentMethodsRequest {
    pub entity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl ListEntityPaymentMethodsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /entities/{entity_id}/payment-methods/{payment_method_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEntityPaymentMethodRequest {
    pub entity_id: String,
    pub payment_method_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetEntityPaymentMethodRequest {
    pub fn new(entity_id: impl Into<String>, payment_method_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            payment_method_id: payment_method_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /entities/{entity_id}/invoices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListInvoicesRequest {
    pub entity_id: String,
    /// Invoice states such as `INVOICE_STATE_BILLED`
    pub states: Vec<String>,
    pub billing_year: Option<i32>,
    /// 1-12
    pub billing_month: Option<u32>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListInvoicesRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_billing_period(mut self, year: i32, month: u32) -> Self {
        self.billing_year = Some(year);
        self.billing_month = Some(month);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("states", &self.states)
            .opt("billing_year", self.billing_year)
            .opt("billing_month", self.billing_month)
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /entities/{entity_id}/aggregate_positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAggregateEntityPositionsRequest {
    pub entity_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListAggregateEntityPositionsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
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

/// Request for GET /entities/{entity_id}/locates_availability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEntityLocateAvailabilitiesRequest {
    pub entity_id: String,
    /// `YYYY-MM-DD`
    pub locate_date: Option<String>,
    pub allowed_status_codes: Vec<u16>,
}

impl GetEntityLocateAvailabilitiesRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    pub fn with_locate_date(mut self, locate_date: impl Into<String>) -> Self {
        self.locate_date = Some(locate_date.into());
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new().opt("locate_date", self.locate_date.as_deref())
    }
}

/// Request for GET /entities/{entity_id}/margin_summaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListMarginCallSummariesRequest {
    pub entity_id: String,
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    pub end_date: Option<String>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListMarginCallSummariesRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .opt("start_date", self.start_date.as_deref())
            .opt("end_date", self.end_date.as_deref())
    }
}

/// Request for GET /entities/{entity_id}/positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntityPositionsRequest {
    pub entity_id: String,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListEntityPositionsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
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

/// Request for GET /entities/{entity_id}/margin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetMarginInformationRequest {
    pub entity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetMarginInformationRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /entities/{entity_id}/accruals.
///
/// Without `portfolio_id` the accruals of every portfolio under the entity are returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListInterestAccrualsRequest {
    pub entity_id: String,
    pub portfolio_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListInterestAccrualsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    pub fn with_portfolio_id(mut self, portfolio_id: impl Into<String>) -> Self {
        self.portfolio_id = Some(portfolio_id.into());
        self
    }

    pub fn with_date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .opt("portfolio_id", self.portfolio_id.as_deref())
            .datetime("start_date", self.start_date.as_ref())
            .datetime("end_date", self.end_date.as_ref())
    }
}

allowed_status_codes!(
    ListAssetsRequest,
    ListEntityBalancesRequest,
    ListUsersRequest,
    ListEntityPaymentMethodsRequest,
    GetEntityPaymentMethodRequest,
    ListInvoicesRequest,
    ListAggregateEntityPositionsRequest,
    GetEntityLocateAvailabilitiesRequest,
    ListMarginCallSummariesRequest,
    ListEntityPositionsRequest,
    GetMarginInformationRequest,
    ListInterestAccrualsRequest,
);
