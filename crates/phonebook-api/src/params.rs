// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use phonebook_core::SessionId;
use phonebook_model::{NewPhoneRecord, ParseError};
use phonebook_query::{ListPageRequest, PhoneFilter, ValidityFilter};

use crate::errors::ApiError;

/// Page size of the HTML listing when `pageSize` is absent.
pub const HTML_DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListPhonesParams {
    pub page_size: Option<i64>,
    pub page_token: String,
    pub country_code: Option<u16>,
    pub phone_number: Option<String>,
    pub valid_only: bool,
    pub not_valid_only: bool,
}

impl ListPhonesParams {
    #[must_use]
    pub fn into_request(self) -> ListPageRequest {
        ListPageRequest {
            page_size: self.page_size,
            page_token: self.page_token,
            filter: PhoneFilter {
                phone_number: self.phone_number,
                country_code: self.country_code,
                validity: ValidityFilter::from_flags(self.valid_only, self.not_valid_only),
            },
        }
    }
}

pub fn parse_list_phones_params(
    query: &BTreeMap<String, String>,
) -> Result<ListPhonesParams, ApiError> {
    Ok(ListPhonesParams {
        page_size: parse_page_size(query, "page_size")?,
        page_token: query.get("page_token").cloned().unwrap_or_default(),
        country_code: parse_country_code(query, "country_code")?,
        phone_number: non_empty(query, "phone_number"),
        valid_only: parse_flag(query, "valid_only")?,
        not_valid_only: parse_flag(query, "not_valid_only")?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidState {
    Valid,
    NotValid,
}

impl ValidState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::NotValid => "NOT_VALID",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "VALID" => Some(Self::Valid),
            "NOT_VALID" => Some(Self::NotValid),
            _ => None,
        }
    }
}

/// Query string of the HTML listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseParams {
    pub page_size: i64,
    pub next_page_token: String,
    pub prev_page_token: String,
    /// Malformed ids are dropped here; the listing then starts a new session.
    pub session_id: Option<SessionId>,
    pub country_code_filter: Option<u16>,
    pub valid_state_filter: Option<ValidState>,
    pub phone_filter: Option<String>,
}

impl BrowseParams {
    #[must_use]
    pub fn filter(&self) -> PhoneFilter {
        PhoneFilter {
            phone_number: self.phone_filter.clone(),
            country_code: self.country_code_filter,
            validity: ValidityFilter::from_flags(
                self.valid_state_filter == Some(ValidState::Valid),
                self.valid_state_filter == Some(ValidState::NotValid),
            ),
        }
    }
}

pub fn parse_browse_params(query: &BTreeMap<String, String>) -> Result<BrowseParams, ApiError> {
    Ok(BrowseParams {
        page_size: parse_page_size(query, "pageSize")?.unwrap_or(HTML_DEFAULT_PAGE_SIZE),
        next_page_token: query.get("nextPageToken").cloned().unwrap_or_default(),
        prev_page_token: query.get("prevPageToken").cloned().unwrap_or_default(),
        session_id: query
            .get("sessionId")
            .filter(|v| !v.is_empty())
            .and_then(|v| SessionId::new(v.as_str()).ok()),
        country_code_filter: parse_country_code(query, "countryCodeFilter")?,
        valid_state_filter: query
            .get("validStateFilter")
            .and_then(|v| ValidState::parse(v)),
        phone_filter: non_empty(query, "phoneFilter"),
    })
}

/// Validates create input before anything touches storage.
pub fn parse_create_phone(
    country_name: &str,
    number: &str,
    cust_id: Option<&str>,
) -> Result<NewPhoneRecord, ApiError> {
    NewPhoneRecord::parse(country_name, number, cust_id).map_err(|e| match e {
        ParseError::Missing(name) => ApiError::missing_field(name),
        ParseError::TooLong(name, _) => {
            let value = if name == "country" { country_name } else { number };
            ApiError::invalid_param(name, value)
        }
        _ => ApiError::invalid_param("phone", number),
    })
}

pub fn parse_phone_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::invalid_param("id", raw))
}

fn parse_page_size(
    query: &BTreeMap<String, String>,
    name: &str,
) -> Result<Option<i64>, ApiError> {
    match query.get(name).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::invalid_param(name, raw)),
    }
}

fn parse_country_code(
    query: &BTreeMap<String, String>,
    name: &str,
) -> Result<Option<u16>, ApiError> {
    match query.get(name).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .trim_start_matches('+')
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ApiError::invalid_param(name, raw)),
    }
}

fn parse_flag(query: &BTreeMap<String, String>, name: &str) -> Result<bool, ApiError> {
    match query.get(name).map(String::as_str) {
        None | Some("") | Some("0") => Ok(false),
        Some("1") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(ApiError::invalid_param(name, v)),
    }
}

fn non_empty(query: &BTreeMap<String, String>, name: &str) -> Option<String> {
    query
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
