// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Phonebook model SSOT: countries, phone records and the number rules.

mod country;
mod phone;
mod validate;

pub use country::{country_code_for, reference_countries, Country, REFERENCE_COUNTRIES};
pub use phone::{
    NewPhoneRecord, ParseError, PhoneRecord, ValidatedPhone, COUNTRY_NAME_MAX_LEN, CUST_ID_MAX_LEN,
    NUMBER_MAX_LEN,
};
pub use validate::{CountryRule, PhoneValidator, Validation, COUNTRY_RULES};

pub const CRATE_NAME: &str = "phonebook-model";
