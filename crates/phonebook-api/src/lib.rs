// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod dto;
pub mod error_mapping;
mod errors;
pub mod params;

pub use dto::{
    CountriesResponseDto, CreatePhoneRequestDto, ErrorEnvelopeDto, HealthDto,
    ListPhonesResponseDto,
};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};
pub use params::{
    parse_browse_params, parse_create_phone, parse_list_phones_params, parse_phone_id,
    BrowseParams, ListPhonesParams, ValidState, HTML_DEFAULT_PAGE_SIZE,
};

pub const CRATE_NAME: &str = "phonebook-api";
