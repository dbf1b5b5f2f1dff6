// SPDX-License-Identifier: Apache-2.0

use phonebook_model::{Country, PhoneRecord};
use phonebook_query::ListPageResponse;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// Body of `POST /v1/phones`. Unknown keys such as a caller-supplied
/// `country_code` or `phone_valid` are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePhoneRequestDto {
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub cust_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListPhonesResponseDto {
    pub records: Vec<PhoneRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_count: Option<u64>,
}

impl From<ListPageResponse> for ListPhonesResponseDto {
    fn from(value: ListPageResponse) -> Self {
        Self {
            records: value.records,
            next_page_token: value.next_page_token,
            collection_count: value.collection_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountriesResponseDto {
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthDto {
    pub status: String,
}

impl HealthDto {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorEnvelopeDto {
    pub error: ApiError,
}
