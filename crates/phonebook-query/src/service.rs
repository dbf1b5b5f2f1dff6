// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use phonebook_core::{Error, Result};
use phonebook_model::{Country, NewPhoneRecord, PhoneRecord, PhoneValidator};
use tracing::info;

use crate::engine::{list_page, storage_failure};
use crate::filters::{ListPageRequest, ListPageResponse};
use crate::limits::PageLimits;
use crate::store::PhoneStore;

/// Record operations over a [`PhoneStore`]. All methods block; the server
/// runs them on the blocking pool.
#[derive(Clone)]
pub struct PhoneBook {
    store: Arc<dyn PhoneStore>,
    validator: &'static PhoneValidator,
    limits: PageLimits,
}

impl std::fmt::Debug for PhoneBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoneBook")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl PhoneBook {
    #[must_use]
    pub fn new(store: Arc<dyn PhoneStore>, limits: PageLimits) -> Self {
        Self::with_validator(store, PhoneValidator::standard(), limits)
    }

    #[must_use]
    pub fn with_validator(
        store: Arc<dyn PhoneStore>,
        validator: &'static PhoneValidator,
        limits: PageLimits,
    ) -> Self {
        Self {
            store,
            validator,
            limits,
        }
    }

    #[must_use]
    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    #[must_use]
    pub fn validator(&self) -> &'static PhoneValidator {
        self.validator
    }

    /// Code and validity are recomputed here; the caller cannot supply them.
    pub fn create_phone_record(&self, input: NewPhoneRecord) -> Result<PhoneRecord> {
        let validated = input.into_validated(self.validator);
        let record = self
            .store
            .create(&validated)
            .map_err(|e| storage_failure("create", e))?;
        info!(
            id = record.id,
            country = %record.country_name,
            phone_valid = record.phone_valid,
            "phone record created"
        );
        Ok(record)
    }

    pub fn get_phone_record(&self, id: u64) -> Result<PhoneRecord> {
        self.store
            .find_by_id(id)
            .map_err(|e| storage_failure("find_by_id", e))?
            .ok_or_else(|| Error::not_found(format!("phone record {id} not found")))
    }

    pub fn delete_phone_record(&self, id: u64) -> Result<()> {
        let deleted = self
            .store
            .delete(id)
            .map_err(|e| storage_failure("delete", e))?;
        if !deleted {
            return Err(Error::not_found(format!("phone record {id} not found")));
        }
        info!(id, "phone record deleted");
        Ok(())
    }

    pub fn list_phone_records(&self, req: &ListPageRequest) -> Result<ListPageResponse> {
        list_page(self.store.as_ref(), req, &self.limits)
    }

    pub fn countries(&self) -> Result<Vec<Country>> {
        self.store
            .countries()
            .map_err(|e| storage_failure("countries", e))
    }
}
