//! Activity types for the Prime REST API.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{ActivityLevel, PaginationParams, QueryParams};

lazy_static! {
    static ref GET_ACTIVITY: Schema = Schema::builder("GetActivityResponse")
        .structured("activity", &ACTIVITY)
        .build();
    static ref LIST_ACTIVITIES: Schema = Schema::builder("ListActivitiesResponse")
        .list_of_structured("activities", &ACTIVITY)
        .structured("pagination", &PAGINATION)
        .build();
}

hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/activities/{activity_id}.
    GetActivityResponse => GET_ACTIVITY
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/activities/{activity_id}.
    GetEntityActivityResponse => GET_ACTIVITY
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/activities.
    ListActivitiesResponse => LIST_ACTIVITIES
}
hydrated_response! {
    /// Response for GET /entities/{entity_id}/activities.
    ListEntityActivitiesResponse => LIST_ACTIVITIES
}

/// Filters shared by the portfolio and entity activity listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    pub symbols: Vec<String>,
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ActivityFilter {
    fn append(&self, query: QueryParams) -> QueryParams {
        query
            .list("symbols", &self.symbols)
            .list("categories", &self.categories)
            .list("statuses", &self.statuses)
            .datetime("start_time", self.start_time.as_ref())
            .datetime("end_time", self.end_time.as_ref())
    }
}

macro_rules! activity_filter_builders {
    ($($request:ty),+ $(,)?) => {
        $(
            impl $request {
                pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.filter.symbols = symbols.into_iter().map(Into::into).collect();
                    self
                }

                /// Categories such as `ORDER`, `TRANSACTION` or `ACCOUNT`.
                pub fn with_categories<I, S>(mut self, categories: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.filter.categories = categories.into_iter().map(Into::into).collect();
                    self
                }

                pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.filter.statuses = statuses.into_iter().map(Into::into).collect();
                    self
                }

                pub fn with_time_range(
                    mut self,
                    start: DateTime<Utc>,
                    end: Option<DateTime<Utc>>,
                ) -> Self {
                    self.filter.start_time = Some(start);
                    self.filter.end_time = end;
                    self
                }

                pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
                    self.pagination = Some(pagination);
                    self
                }
            }
        )+
    };
}

/// Request for GET /portfolios/{portfolio_id}/activities/{activity_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetActivityRequest {
    pub portfolio_id: String,
    pub activity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetActivityRequest {
    pub fn new(portfolio_id: impl Into<String>, activity_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            activity_id: activity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /entities/{entity_id}/activities/{activity_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEntityActivityRequest {
    pub entity_id: String,
    pub activity_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl GetEntityActivityRequest {
    pub fn new(entity_id: impl Into<String>, activity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            activity_id: activity_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/activities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListActivitiesRequest {
    pub portfolio_id: String,
    pub filter: ActivityFilter,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListActivitiesRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub(crate) fn query(&self) -> QueryParams {
        self.filter
            .append(QueryParams::new())
            .pagination(self.pagination.as_ref())
    }
}

/// Request for GET /entities/{entity_id}/activities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntityActivitiesRequest {
    pub entity_id: String,
    pub activity_level: Option<ActivityLevel>,
    pub filter: ActivityFilter,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl ListEntityActivitiesRequest {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    pub fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        let query = QueryParams::new().opt("activity_level", self.activity_level);
        self.filter
            .append(query)
            .pagination(self.pagination.as_ref())
    }
}

activity_filter_builders!(ListActivitiesRequest, ListEntityActivitiesRequest);

allowed_status_codes!(
    GetActivityRequest,
    GetEntityActivityRequest,
    ListActivitiesRequest,
    ListEntityActivitiesRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_activities_send_activity_level() {
        let request = ListEntityActivitiesRequest::new("e1")
            .with_activity_level(ActivityLevel::Portfolio)
            .with_symbols(["BTC"]);

        assert_eq!(
            request.query().to_query_string(),
            "activity_level=ACTIVITY_LEVEL_PORTFOLIO&symbols=BTC"
        );
    }

    #[test]
    fn test_activities_query() {
        let request = ListActivitiesRequest::new("p1")
            .with_categories(["ORDER"])
            .with_statuses(["ACTIVITY_STATUS_COMPLETED"])
            .with_pagination(PaginationParams::new().with_cursor("c2"));

        assert_eq!(
            request.query().to_query_string(),
            "categories=ORDER&statuses=ACTIVITY_STATUS_COMPLETED&cursor=c2"
        );
    }

    #[test]
    fn test_activity_response_hydrates_user_actions() {
        let response = GetActivityResponse::from_value(json!({
            "activity": {
                "id": "a-1",
                "user_actions": [{"action": "APPROVE", "user_id": "u-1"}],
                "account_metadata": {"consensus": {"approval_deadline": "2024-01-01T00:00:00Z"}},
                "symbols": ["ETH"]
            }
        }));

        let activity = response.record("activity").unwrap();
        assert_eq!(activity.records("user_actions")[0].str("action"), Some("APPROVE"));
        assert_eq!(activity.strings("symbols"), vec!["ETH"]);
        assert!(activity
            .record("account_metadata")
            .and_then(|m| m.record("consensus"))
            .is_some());
    }
}
