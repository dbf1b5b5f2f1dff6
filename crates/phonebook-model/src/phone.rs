// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::validate::{PhoneValidator, Validation};

pub const NUMBER_MAX_LEN: usize = 64;
pub const COUNTRY_NAME_MAX_LEN: usize = 40;
pub const CUST_ID_MAX_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Missing(&'static str),
    TooLong(&'static str, usize),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "missing {name}"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A persisted phone record.
///
/// `country_code` and `phone_valid` are always the validator's output for
/// (`country_name`, `number`) at the last write. `country_code` is `None`
/// when the country name is outside the reference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub id: u64,
    pub country_code: Option<u16>,
    pub country_name: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cust_id: Option<String>,
    pub phone_valid: bool,
    pub create_date: DateTime<Utc>,
}

/// Caller input for the create path.
///
/// Deliberately carries no code and no validity flag: both are recomputed
/// by [`NewPhoneRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoneRecord {
    country_name: String,
    number: String,
    cust_id: Option<String>,
}

impl NewPhoneRecord {
    pub fn parse(
        country_name: &str,
        number: &str,
        cust_id: Option<&str>,
    ) -> Result<Self, ParseError> {
        if country_name.trim().is_empty() {
            return Err(ParseError::Missing("country"));
        }
        let number = number.trim();
        if number.is_empty() {
            return Err(ParseError::Missing("phone number"));
        }
        if country_name.len() > COUNTRY_NAME_MAX_LEN {
            return Err(ParseError::TooLong("country", COUNTRY_NAME_MAX_LEN));
        }
        if number.len() > NUMBER_MAX_LEN {
            return Err(ParseError::TooLong("phone number", NUMBER_MAX_LEN));
        }
        let cust_id = cust_id.map(str::trim).filter(|v| !v.is_empty());
        if let Some(id) = cust_id {
            if id.len() > CUST_ID_MAX_LEN {
                return Err(ParseError::TooLong("cust_id", CUST_ID_MAX_LEN));
            }
        }
        Ok(Self {
            country_name: country_name.to_string(),
            number: number.to_string(),
            cust_id: cust_id.map(ToString::to_string),
        })
    }

    #[must_use]
    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn cust_id(&self) -> Option<&str> {
        self.cust_id.as_deref()
    }

    #[must_use]
    pub fn validate(&self, validator: &PhoneValidator) -> Validation {
        validator.validate(&self.country_name, &self.number)
    }

    #[must_use]
    pub fn into_validated(self, validator: &PhoneValidator) -> ValidatedPhone {
        let validation = self.validate(validator);
        ValidatedPhone {
            input: self,
            validation,
        }
    }
}

/// Create input paired with the validator's verdict; the only value a store
/// accepts for inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPhone {
    input: NewPhoneRecord,
    validation: Validation,
}

impl ValidatedPhone {
    #[must_use]
    pub fn input(&self) -> &NewPhoneRecord {
        &self.input
    }

    #[must_use]
    pub fn country_code(&self) -> Option<u16> {
        self.validation.country_code
    }

    #[must_use]
    pub fn phone_valid(&self) -> bool {
        self.validation.valid
    }
}
