//! Post-trade allocation types for the Prime REST API.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{OrderSide, PaginationParams, QueryParams, SizeType};

lazy_static! {
    static ref CREATE_PORTFOLIO_ALLOCATIONS: Schema =
        Schema::builder("CreatePortfolioAllocationsResponse")
            .primitives(&["success", "allocation_id", "failure_reason"])
            .build();
    static ref CREATE_PORTFOLIO_NET_ALLOCATIONS: Schema =
        Schema::builder("CreatePortfolioNetAllocationsResponse")
            .primitives(&[
                "success",
                "netting_id",
                "buy_allocation_id",
                "sell_allocation_id",
                "failure_reason",
            ])
            .build();
    static ref GET_ALLOCATION_BY_ID: Schema = Schema::builder("GetAllocationByIdResponse")
        .structured("allocation", &ALLOCATION)
        .build();
    static ref GET_NET_ALLOCATIONS_BY_NETTING_ID: Schema =
        Schema::builder("GetNetAllocationsByNettingIdResponse")
            .list_of_structured("allocations", &ALLOCATION)
            .build();
    static ref LIST_PORTFOLIO_ALLOCATIONS: Schema = Schema::builder("ListPortfolioAllocationsResponse")
        .list_of_structured("allocations", &ALLOCATION)
        .structured("pagination", &PAGINATION)
        .build();
}

hydrated_response! {
    /// Response for POST /allocations.
    CreatePortfolioAllocationsResponse => CREATE_PORTFOLIO_ALLOCATIONS
}
hydrated_response! {
    /// Response for POST /allocations/net.
    CreatePortfolioNetAllocationsResponse => CREATE_PORTFOLIO_NET_ALLOCATIONS
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/allocations/{allocation_id}.
    GetAllocationByIdResponse => GET_ALLOCATION_BY_ID
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/allocations/net/{netting_id}.
    GetNetAllocationsByNettingIdResponse => GET_NET_ALLOCATIONS_BY_NETTING_ID
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/allocations.
    ListPortfolioAllocationsResponse => LIST_PORTFOLIO_ALLOCATIONS
}

/// One destination of an allocation.
///
/// `leg_id` is the legacy name of `allocation_leg_id`. Requests are normalized before they are
/// sent so both fields carry the same value; a set `leg_id` wins and logs a deprecation warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationLeg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_leg_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_id: Option<String>,
    pub destination_portfolio_id: String,
    /// Amount in the unit given by the request's `size_type`
    pub amount: String,
}

impl AllocationLeg {
    pub fn new(
        allocation_leg_id: impl Into<String>,
        destination_portfolio_id: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            allocation_leg_id: Some(allocation_leg_id.into()),
            leg_id: None,
            destination_portfolio_id: destination_portfolio_id.into(),
            amount: amount.into(),
        }
    }

    /// Set the leg id through its deprecated name.
    #[deprecated(note = "use `allocation_leg_id`")]
    pub fn with_leg_id(mut self, leg_id: impl Into<String>) -> Self {
        self.leg_id = Some(leg_id.into());
        self
    }

    /// Mirror `leg_id` and `allocation_leg_id` into each other.
    pub fn normalized(mut self) -> Self {
        match self.leg_id.take() {
            Some(leg_id) => {
                tracing::warn!(
                    leg_id = %leg_id,
                    "AllocationLeg.leg_id is deprecated, use allocation_leg_id instead"
                );
                self.allocation_leg_id = Some(leg_id.clone());
                self.leg_id = Some(leg_id);
            }
            None => self.leg_id = self.allocation_leg_id.clone(),
        }
        self
    }
}

/// Request for POST /allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePortfolioAllocationsRequest {
    pub allocation_id: String,
    pub source_portfolio_id: String,
    pub product_id: String,
    pub order_ids: Vec<String>,
    pub allocation_legs: Vec<AllocationLeg>,
    pub size_type: SizeType,
    /// Portfolio receiving whatever the legs leave unallocated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder_destination_portfolio_id: Option<String>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreatePortfolioAllocationsRequest {
    pub fn new(
        allocation_id: impl Into<String>,
        source_portfolio_id: impl Into<String>,
        product_id: impl Into<String>,
        size_type: SizeType,
    ) -> Self {
        Self {
            allocation_id: allocation_id.into(),
            source_portfolio_id: source_portfolio_id.into(),
            product_id: product_id.into(),
            order_ids: Vec::new(),
            allocation_legs: Vec::new(),
            size_type,
            remainder_destination_portfolio_id: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_order_ids<I, S>(mut self, order_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_ids = order_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_leg(mut self, leg: AllocationLeg) -> Self {
        self.allocation_legs.push(leg);
        self
    }

    pub fn with_remainder_destination(mut self, portfolio_id: impl Into<String>) -> Self {
        self.remainder_destination_portfolio_id = Some(portfolio_id.into());
        self
    }

    /// Normalize every leg.
    pub fn normalized(mut self) -> Self {
        self.allocation_legs = self
            .allocation_legs
            .into_iter()
            .map(AllocationLeg::normalized)
            .collect();
        self
    }
}

/// Request for POST /allocations/net.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePortfolioNetAllocationsRequest {
    pub allocation_id: String,
    pub source_portfolio_id: String,
    pub product_id: String,
    pub order_ids: Vec<String>,
    pub allocation_legs: Vec<AllocationLeg>,
    pub size_type: SizeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder_destination_portfolio_id: Option<String>,
    /// Caller-chosen id grouping the netted buy and sell allocations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netting_id: Option<String>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreatePortfolioNetAllocationsRequest {
    pub fn new(
        allocation_id: impl Into<String>,
        source_portfolio_id: impl Into<String>,
        product_id: impl Into<String>,
        size_type: SizeType,
    ) -> Self {
        Self {
            allocation_id: allocation_id.into(),
            source_portfolio_id: source_portfolio_id.into(),
            product_id: product_id.into(),
            order_ids: Vec::new(),
            allocation_legs: Vec::new(),
            size_type,
            remainder_destination_portfolio_id: None,
            netting_id: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_order_ids<I, S>(mut self, order_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_ids = order_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_leg(mut self, leg: AllocationLeg) -> Self {
        self.allocation_legs.push(leg);
        self
    }

    pub fn with_remainder_destination(mut self, portfolio_id: impl Into<String>) -> Self {
        self.remainder_destination_portfolio_id = Some(portfolio_id.into());
        self
    }

    pub fn with_netting_id(mut self, netting_id: impl Into<String>) -> Self {
        self.netting_id = Some(netting_id.into());
        self
    }

    pub fn normalized(mut self) -> Self {
        self.allocation_legs = self
            .allocation_legs
            .into_iter()
            .map(AllocationLeg::normalized)
            .collect();
        self
    }
}

/// Request for GET /portfolios/{portfolio_id}/allocations/{allocation_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAllocationByIdRequest {
    pub portfolio_id: String,
    pub allocation_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetAllocationByIdRequest {
    pub fn new(portfolio_id: impl Into<String>, allocation_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            allocation_id: allocation_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/allocations/net/{netting_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetNetAllocationsByNettingIdRequest {
    pub portfolio_id: String,
    pub netting_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetNetAllocationsByNettingIdRequest {
    pub fn new(portfolio_id: impl Into<String>, netting_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            netting_id: netting_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/allocations.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPortfolioAllocationsRequest {
    pub portfolio_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub product_ids: Vec<String>,
    pub order_side: Option<OrderSide>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListPortfolioAllocationsRequest {
    pub fn new(portfolio_id: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            start_date,
            end_date: None,
            product_ids: Vec::new(),
            order_side: None,
            pagination: None,
            allowed_status_codes: Vec::new(),
        }
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
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

    pub fn with_order_side(mut self, side: OrderSide) -> Self {
        self.order_side = Some(side);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .list("product_ids", &self.product_ids)
            .opt("order_side", self.order_side)
            .datetime("start_date", Some(&self.start_date))
            .datetime("end_date", self.end_date.as_ref())
            .pagination(self.pagination.as_ref())
    }
}

allowed_status_codes!(
    CreatePortfolioAllocationsRequest,
    CreatePortfolioNetAllocationsRequest,
    GetAllocationByIdRequest,
    GetNetAllocationsByNettingIdRequest,
    ListPortfolioAllocationsRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_leg_mirrors_allocation_leg_id() {
        let leg = AllocationLeg::new("leg-1", "p2", "10").normalized();
        assert_eq!(leg.allocation_leg_id.as_deref(), Some("leg-1"));
        assert_eq!(leg.leg_id.as_deref(), Some("leg-1"));
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_leg_id_wins() {
        let leg = AllocationLeg::new("new", "p2", "10")
            .with_leg_id("legacy")
            .normalized();
        assert_eq!(leg.allocation_leg_id.as_deref(), Some("legacy"));
        assert_eq!(leg.leg_id.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_create_allocations_body() {
        let request = CreatePortfolioAllocationsRequest::new("a-1", "p1", "BTC-USD", SizeType::Percent)
            .with_order_ids(["o-1"])
            .with_leg(AllocationLeg::new("leg-1", "p2", "100"))
            .with_allowed_status_codes([409])
            .normalized();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "allocation_id": "a-1",
                "source_portfolio_id": "p1",
                "product_id": "BTC-USD",
                "order_ids": ["o-1"],
                "allocation_legs": [{
                    "allocation_leg_id": "leg-1",
                    "leg_id": "leg-1",
                    "destination_portfolio_id": "p2",
                    "amount": "100"
                }],
                "size_type": "PERCENT"
            })
        );
    }

    #[test]
    fn test_net_allocations_body_carries_netting_id() {
        let request = CreatePortfolioNetAllocationsRequest::new("a-1", "p1", "ETH-USD", SizeType::Base)
            .with_netting_id("n-1")
            .with_remainder_destination("p3");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["netting_id"], "n-1");
        assert_eq!(body["remainder_destination_portfolio_id"], "p3");
        assert!(body.get("allowed_status_codes").is_none());
    }

    #[test]
    fn test_list_allocations_query() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let request = ListPortfolioAllocationsRequest::new("p1", start)
            .with_product_ids(["BTC-USD"])
            .with_order_side(OrderSide::Buy);

        assert_eq!(
            request.query().to_query_string(),
            "product_ids=BTC-USD&order_side=BUY&start_date=2024-05-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn test_allocation_response_hydrates_destinations() {
        let response = GetAllocationByIdResponse::from_value(json!({
            "allocation": {
                "root_id": "r-1",
                "order_ids": ["o-1", "o-2"],
                "destinations": [{"leg_id": "leg-1", "portfolio_id": "p2"}]
            }
        }));

        let allocation = response.record("allocation").unwrap();
        assert_eq!(allocation.strings("order_ids"), vec!["o-1", "o-2"]);
        assert_eq!(allocation.records("destinations")[0].str("portfolio_id"), Some("p2"));
    }
}
