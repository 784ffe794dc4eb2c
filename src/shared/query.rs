//! Query string assembly.
//!
//! Unset optional parameters are dropped, list parameters repeat their key, and
//! timestamps are rendered as RFC 3339 UTC with a `Z` suffix.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::shared::types::PaginationParams;

/// Ordered list of query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter.
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter only when it is set.
    pub fn opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Append `key=value` once per element.
    pub fn list<V: Display>(self, key: &str, values: &[V]) -> Self {
        values.iter().fold(self, |query, value| query.param(key, value))
    }

    /// Append a timestamp when it is set.
    pub fn datetime(self, key: &str, value: Option<&DateTime<Utc>>) -> Self {
        self.opt(key, value.map(format_datetime))
    }

    /// Append the cursor, limit and sort direction that are set.
    pub fn pagination(self, pagination: Option<&PaginationParams>) -> Self {
        match pagination {
            Some(p) => self
                .opt("cursor", p.cursor.as_deref())
                .opt("limit", p.limit)
                .opt("sort_direction", p.sort_direction),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Raw key/value pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encode as `a=1&b=2` (without a leading `?`).
    pub fn to_query_string(&self) -> String {
        // Encoding a sequence of string pairs cannot fail.
        serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
    }
}

/// Render a timestamp the way Prime expects it in queries and bodies.
///
/// Sub-second precision is kept (milli, micro or nanoseconds as needed).
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Percent-encode a single path segment.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{OrderSide, SortDirection};
    use chrono::TimeZone;

    #[test]
    fn test_unset_params_are_omitted() {
        let query = QueryParams::new()
            .opt("symbols", None::<&str>)
            .opt("order_side", Some(OrderSide::Buy))
            .pagination(None);

        assert_eq!(query.to_query_string(), "order_side=BUY");
    }

    #[test]
    fn test_list_params_repeat_key() {
        let query = QueryParams::new().list("product_ids", &["BTC-USD", "ETH-USD"]);
        assert_eq!(query.to_query_string(), "product_ids=BTC-USD&product_ids=ETH-USD");

        let empty: &[&str] = &[];
        assert!(QueryParams::new().list("product_ids", empty).is_empty());
    }

    #[test]
    fn test_datetime_rendering() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_datetime(&at), "2024-01-02T03:04:05Z");

        let query = QueryParams::new().datetime("start_date", Some(&at));
        assert_eq!(query.to_query_string(), "start_date=2024-01-02T03%3A04%3A05Z");
    }

    #[test]
    fn test_datetime_keeps_fractional_seconds() {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let micros = base + chrono::Duration::microseconds(123_456);
        assert_eq!(format_datetime(&micros), "2024-01-02T03:04:05.123456Z");

        let millis = base + chrono::Duration::milliseconds(250);
        assert_eq!(format_datetime(&millis), "2024-01-02T03:04:05.250Z");
    }

    #[test]
    fn test_pagination_params() {
        let pagination = PaginationParams::new()
            .with_cursor("next page")
            .with_limit(50)
            .with_sort_direction(SortDirection::Asc);

        let query = QueryParams::new().pagination(Some(&pagination));
        assert_eq!(
            query.to_query_string(),
            "cursor=next+page&limit=50&sort_direction=ASC"
        );
    }

    #[test]
    fn test_path_segment_encoding() {
        assert_eq!(path_segment("abc-123"), "abc-123");
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
    }
}
