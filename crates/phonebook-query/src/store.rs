// SPDX-License-Identifier: Apache-2.0

use phonebook_model::{Country, PhoneRecord, ValidatedPhone};

use crate::filters::PhoneFilter;

/// Storage failure detail. Never shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self(value.to_string())
    }
}

/// One page fetch: rows matching `filter` with `id < before_id` (when set),
/// id-descending, at most `limit` rows.
#[derive(Debug, Clone, Copy)]
pub struct RecordQuery<'a> {
    pub filter: &'a PhoneFilter,
    pub before_id: Option<u64>,
    pub limit: usize,
}

pub trait PhoneStore: Send + Sync {
    fn create(&self, phone: &ValidatedPhone) -> Result<PhoneRecord, StoreError>;

    fn find_by_id(&self, id: u64) -> Result<Option<PhoneRecord>, StoreError>;

    /// `Ok(false)` when no row had that id.
    fn delete(&self, id: u64) -> Result<bool, StoreError>;

    fn query(&self, query: &RecordQuery<'_>) -> Result<Vec<PhoneRecord>, StoreError>;

    fn count(&self, filter: &PhoneFilter) -> Result<u64, StoreError>;

    fn countries(&self) -> Result<Vec<Country>, StoreError>;
}
