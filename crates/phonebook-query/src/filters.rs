// SPDX-License-Identifier: Apache-2.0

use phonebook_model::PhoneRecord;
use serde::{Deserialize, Serialize};

/// Tri-state validity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityFilter {
    #[default]
    Any,
    ValidOnly,
    InvalidOnly,
}

impl ValidityFilter {
    /// Both flags set, or neither, means no validity restriction.
    #[must_use]
    pub fn from_flags(valid_only: bool, not_valid_only: bool) -> Self {
        match (valid_only, not_valid_only) {
            (true, false) => Self::ValidOnly,
            (false, true) => Self::InvalidOnly,
            _ => Self::Any,
        }
    }

    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Any => None,
            Self::ValidOnly => Some(true),
            Self::InvalidOnly => Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhoneFilter {
    pub phone_number: Option<String>,
    pub country_code: Option<u16>,
    #[serde(default)]
    pub validity: ValidityFilter,
}

impl PhoneFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none()
            && self.country_code.is_none()
            && self.validity == ValidityFilter::Any
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListPageRequest {
    /// `None` or a non-positive size selects the default.
    pub page_size: Option<i64>,
    pub page_token: String,
    pub filter: PhoneFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPageResponse {
    pub records: Vec<PhoneRecord>,
    pub next_page_token: Option<String>,
    /// Present only when the request carried no page token.
    pub collection_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_flags_collapse_to_any_when_both_set() {
        assert_eq!(ValidityFilter::from_flags(true, true), ValidityFilter::Any);
        assert_eq!(ValidityFilter::from_flags(false, false), ValidityFilter::Any);
        assert_eq!(
            ValidityFilter::from_flags(true, false),
            ValidityFilter::ValidOnly
        );
        assert_eq!(
            ValidityFilter::from_flags(false, true),
            ValidityFilter::InvalidOnly
        );
    }
}
