//! Address book and onchain address group types for the Prime REST API.

use lazy_static::lazy_static;
use serde::Serialize;

use super::allowed_status_codes;
use crate::api::models::*;
use crate::hydrate::{hydrated_response, Schema};
use crate::shared::{NetworkType, PaginationParams, QueryParams};

lazy_static! {
    static ref GET_ADDRESS_BOOK: Schema = Schema::builder("GetAddressBookResponse")
        .list_of_structured("addresses", &ADDRESS_BOOK_ENTRY)
        .structured("pagination", &PAGINATION)
        .build();
    /// Address book changes go through consensus; every mutation answers with the activity.
    static ref ADDRESS_BOOK_ACTIVITY: Schema = Schema::builder("AddressBookActivityResponse")
        .primitives(&["activity_type", "num_approvals_remaining", "activity_id"])
        .build();
    static ref LIST_ONCHAIN_ADDRESS_GROUPS: Schema =
        Schema::builder("ListOnchainAddressGroupsResponse")
            .list_of_structured("address_groups", &ADDRESS_GROUP)
            .build();
}

hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/address_book.
    GetAddressBookResponse => GET_ADDRESS_BOOK
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/address_book.
    CreateAddressBookEntryResponse => ADDRESS_BOOK_ACTIVITY
}
hydrated_response! {
    /// Response for POST /portfolios/{portfolio_id}/onchain_address_group.
    CreateOnchainAddressBookEntryResponse => ADDRESS_BOOK_ACTIVITY
}
hydrated_response! {
    /// Response for PUT /portfolios/{portfolio_id}/onchain_address_group.
    UpdateOnchainAddressBookResponse => ADDRESS_BOOK_ACTIVITY
}
hydrated_response! {
    /// Response for DELETE /portfolios/{portfolio_id}/onchain_address_group/{address_group_id}.
    DeleteOnchainAddressGroupResponse => ADDRESS_BOOK_ACTIVITY
}
hydrated_response! {
    /// Response for GET /portfolios/{portfolio_id}/onchain_address_groups.
    ListOnchainAddressGroupsResponse => LIST_ONCHAIN_ADDRESS_GROUPS
}

/// Request for GET /portfolios/{portfolio_id}/address_book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAddressBookRequest {
    pub portfolio_id: String,
    pub currency_symbol: Option<String>,
    /// Free-text search over names and addresses
    pub search: Option<String>,
    pub pagination: Option<PaginationParams>,
    pub allowed_status_codes: Vec<u16>,
}

impl GetAddressBookRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub(crate) fn query(&self) -> QueryParams {
        QueryParams::new()
            .opt("currency_symbol", self.currency_symbol.as_deref())
            .opt("search", self.search.as_deref())
            .pagination(self.pagination.as_ref())
    }
}

/// Request for POST /portfolios/{portfolio_id}/address_book.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateAddressBookEntryRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub address: String,
    pub currency_symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_identifier: Option<String>,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateAddressBookEntryRequest {
    pub fn new(
        portfolio_id: impl Into<String>,
        address: impl Into<String>,
        currency_symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            address: address.into(),
            currency_symbol: currency_symbol.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_account_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.account_identifier = Some(identifier.into());
        self
    }
}

/// One address inside an [`AddressGroup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnchainAddress {
    pub name: String,
    pub address: String,
    pub chain_ids: Vec<String>,
}

impl OnchainAddress {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            chain_ids: Vec::new(),
        }
    }

    pub fn with_chain_ids<I, S>(mut self, chain_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chain_ids = chain_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Onchain address group as sent in create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressGroup {
    /// Server-assigned; required for updates, omitted on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub network_type: NetworkType,
    pub addresses: Vec<OnchainAddress>,
}

impl AddressGroup {
    pub fn new(name: impl Into<String>, network_type: NetworkType) -> Self {
        Self {
            name: name.into(),
            network_type,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_address(mut self, address: OnchainAddress) -> Self {
        self.addresses.push(address);
        self
    }
}

/// Request for POST /portfolios/{portfolio_id}/onchain_address_group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateOnchainAddressBookEntryRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub address_group: AddressGroup,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl CreateOnchainAddressBookEntryRequest {
    pub fn new(portfolio_id: impl Into<String>, address_group: AddressGroup) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            address_group,
            ..Default::default()
        }
    }
}

/// Request for PUT /portfolios/{portfolio_id}/onchain_address_group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateOnchainAddressBookRequest {
    #[serde(skip)]
    pub portfolio_id: String,
    pub address_group: AddressGroup,
    #[serde(skip)]
    pub allowed_status_codes: Vec<u16>,
}

impl UpdateOnchainAddressBookRequest {
    pub fn new(portfolio_id: impl Into<String>, address_group: AddressGroup) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            address_group,
            ..Default::default()
        }
    }
}

/// Request for DELETE /portfolios/{portfolio_id}/onchain_address_group/{address_group_id}.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOnchainAddressGroupRequest {
    pub portfolio_id: String,
    pub address_group_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl DeleteOnchainAddressGroupRequest {
    pub fn new(portfolio_id: impl Into<String>, address_group_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            address_group_id: address_group_id.into(),
            ..Default::default()
        }
    }
}

/// Request for GET /portfolios/{portfolio_id}/onchain_address_groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOnchainAddressGroupsRequest {
    pub portfolio_id: String,
    pub allowed_status_codes: Vec<u16>,
}

impl ListOnchainAddressGroupsRequest {
    pub fn new(portfolio_id: impl Into<String>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            ..Default::default()
        }
    }
}

allowed_status_codes!(
    GetAddressBookRequest,
    CreateAddressBookEntryRequest,
    CreateOnchainAddressBookEntryRequest,
    UpdateOnchainAddressBookRequest,
    DeleteOnchainAddressGroupRequest,
    ListOnchainAddressGroupsRequest,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_book_query() {
        let request = GetAddressBookRequest::new("p1")
            .with_currency_symbol("ETH")
            .with_search("treasury wallet");

        assert_eq!(
            request.query().to_query_string(),
            "currency_symbol=ETH&search=treasury+wallet"
        );
    }

    #[test]
    fn test_create_onchain_group_body_omits_id() {
        let group = AddressGroup::new("Treasury", NetworkType::Evm).with_address(
            OnchainAddress::new("hot", "0xabc").with_chain_ids(["1", "8453"]),
        );
        let request = CreateOnchainAddressBookEntryRequest::new("p1", group);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "address_group": {
                    "name": "Treasury",
                    "network_type": "NETWORK_TYPE_EVM",
                    "addresses": [{"name": "hot", "address": "0xabc", "chain_ids": ["1", "8453"]}]
                }
            })
        );
    }

    #[test]
    fn test_update_onchain_group_body_carries_id() {
        let group = AddressGroup::new("Treasury", NetworkType::Solana).with_id("g-1");
        let body = serde_json::to_value(UpdateOnchainAddressBookRequest::new("p1", group)).unwrap();
        assert_eq!(body["address_group"]["id"], "g-1");
    }

    #[test]
    fn test_mutations_share_activity_shape() {
        let created = CreateAddressBookEntryResponse::from_value(json!({
            "activity_type": "ACTIVITY_TYPE_ADDRESS_BOOK",
            "num_approvals_remaining": 2,
            "activity_id": "a-1"
        }));
        assert_eq!(created.i64("num_approvals_remaining"), Some(2));

        let deleted = DeleteOnchainAddressGroupResponse::from_value(json!({"activity_id": "a-2"}));
        assert_eq!(deleted.str("activity_id"), Some("a-2"));
        assert_eq!(
            DeleteOnchainAddressGroupResponse::schema().name(),
            "AddressBookActivityResponse"
        );
    }
}
