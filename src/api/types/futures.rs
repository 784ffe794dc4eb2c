//! Futures (FCM) types for the Prime REST API.

use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::QueryParams;

lazy_static! {
    static ref GET_ENTITY_FCM_BALANCE: Schema = Schema::builder("GetEntityFcmBalanceResponse")
        .structured("balance_summary", &FCM_BALANCE)
        .build();
    static ref GET_ENTITY_POSITIONS: Schema = Schema::builder("GetEntityPositionsResponse")
        .list_of_structured("positions", &FUTURES_POSITION)
        .primitive("clearing_account_id")
        .build();
    static ref LIST_ENTITY_FUTURES_SWEEPS: Schema = Schema::builder("ListEntityFuturesSweepsResponse")
        .list_of_structured("sweeps", &SWEEP)
        .primitive("auto_sweep")
        .build();
    static ref SWEEP_ACK: Schema = Schema::builder("FuturesSweepResponse")
        .primitives(&["success", "request_id"])
        .build();
    static ref SET_AUTO_SWEEP: Schema = Schema::builder("SetAutoSweepResponse")
        .primitive("success")
        .build();
}

hydrated_response! {
    /// Response for GET /entities/{entity_id}/futures/balance_summary.
    GetEntityFcmBalanceResponse => GET_ENTITY_FCM_BALANCE
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/futures/positions.
    GetEntityPositionsResponse => GET_ENTITY_POSITIONS
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/futures/sweeps.
    ListEntityFuturesSweepsResponse => LIST_ENTITY_FUTURES_SWEEPS
}
hydrated_response! {
    /// Response for POST /entities/{entity_id}/futures/sweeps.
    ScheduleEntityFuturesSweepResponse => SWEEP_ACK
}
hydrated_response! {
    /// Response for DELETE /entities/{entity_id}/futures/sweeps.
    CancelEntityFuturesSweepResponse => SWEEP_ACK
}
hydrated_response! {
    /// Response for POST /entities/{entity_id}/futures/auto_sweep.
    SetAutoSweepResponse => SET_AUTO_SWEEP
}

/// Request for GET /entities/{entity_id}/futures/balance_summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEntityFcmBalanceRequest {
    pub entity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetEntityFcmBalanceRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /entities/{entity_id}/futures/positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEntityPositionsRequest {
    pub entity_id: String,
    pub product_id: Option<String>,
    pub allowed_status_codes: Vec<u16>,
}

impl GetEntityPositionsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new().opt("product_id", self.product_id.as_deref())
    }
}

/// Request for GET /entities/{entity_id}/futures/sweeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntityFuturesSweepsRequest {
    pub entity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl ListEntityFuturesSweepsRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for POST /entities/{entity_id}/futures/sweeps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleEntityFuturesSweepRequest {
    #[serde(skip)]
    pub entity_id: String,
    pub amount: String,
    pub currency: String,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl ScheduleEntityFuturesSweepRequest {
    pub fn new(
        entity_id: impl Into<String>,
        amount: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            amount: amount.into(),
            currency: currency.into(),
            ..Default::default()
        }
    }
}

/// Request for DELETE /entities/{entity_id}/futures/sweeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelEntityFuturesSweepRequest {
    pub entity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl CancelEntityFuturesSweepRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for POST /entities/{entity_id}/futures/auto_sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetAutoSweepRequest {
    #[serde(skip)]
    pub entity_id: String,
    pub auto_sweep: bool,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl SetAutoSweepRequest {
    pub fn new(entity_id: impl Into<String>, auto_sweep: bool) -> Self {
        Self {
            entity_id: entity_id.into(),
            auto_sweep,
            ..Default::default()
        }
    }
}

allowed_status_codes!(
    GetEntityFcmBalanceRequest,
    GetEntityPositionsRequest,
    ListEntityFuturesSweepsRequest,
    ScheduleEntityFuturesSweepRequest,
    CancelEntityFuturesSweepRequest,
    SetAutoSweepRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_sweep_body() {
        let request = ScheduleEntityFuturesSweepRequest::new("e1", "1000", "USD");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"amount": "1000", "currency": "USD"})
        );
    }

    #[test]
    fn test_set_auto_sweep_body() {
        let request = SetAutoSweepRequest::new("e1", true).with_allowed_status_codes([202]);
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"auto_sweep": true}));
    }

    #[test]
    fn test_positions_query() {
        assert!(GetEntityPositionsRequest::new("e1").query().is_empty());
        assert_eq!(
            GetEntityPositionsRequest::new("e1")
                .with_product_id("BIT-28JUN24-CDE")
                .query()
                .to_query_string(),
            "product_id=BIT-28JUN24-CDE"
        );
    }

    #[test]
    fn test_sweeps_response() {
        let response = ListEntityFuturesSweepsResponse::from_value(json!({
            "sweeps": [{
                "id": "s-1",
                "requested_amount": {"currency": "USD", "amount": "500"},
                "status": "PENDING"
            }],
            "auto_sweep": true
        }));

        assert_eq!(response.bool("auto_sweep"), Some(true));
        let sweeps = response.records("sweeps");
        let sweep = sweeps[0];
        assert_eq!(
            sweep.record("requested_amount").and_then(|a| a.str("amount")),
            Some("500")
        );
    }
}
