// SPDX-License-Identifier: Apache-2.0

use phonebook_model::{NewPhoneRecord, PhoneValidator, REFERENCE_COUNTRIES};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::filters::PhoneFilter;
use crate::store::{PhoneStore, StoreError};

/// Inserts `count` demo phones spread over the reference countries.
///
/// Numbers are random but always carry the country prefix. Half of them
/// start with a 4, which most country rules reject, so the listing holds
/// both valid and invalid rows. Validity is always the validator's verdict.
pub fn seed_demo_phones<R: Rng + ?Sized>(
    store: &dyn PhoneStore,
    validator: &PhoneValidator,
    count: usize,
    rng: &mut R,
) -> Result<usize, StoreError> {
    let mut inserted = 0;
    for _ in 0..count {
        let Some((code, name)) = REFERENCE_COUNTRIES.choose(rng) else {
            break;
        };
        let subscriber: u64 = rng.gen_range(100_000_000..1_000_000_000);
        let number = if rng.gen_bool(0.5) {
            format!("({code}) {subscriber}")
        } else {
            format!("({code}) 4{:08}", subscriber % 100_000_000)
        };
        let input = NewPhoneRecord::parse(name, &number, None)
            .map_err(|e| StoreError(format!("demo record rejected: {e}")))?;
        store.create(&input.into_validated(validator))?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Seeds demo phones only into an empty table, so restarting against a
/// kept database does not grow it. Returns the number of rows inserted.
pub fn seed_demo_phones_if_empty<R: Rng + ?Sized>(
    store: &dyn PhoneStore,
    validator: &PhoneValidator,
    count: usize,
    rng: &mut R,
) -> Result<usize, StoreError> {
    if store.count(&PhoneFilter::default())? > 0 {
        return Ok(0);
    }
    seed_demo_phones(store, validator, count, rng)
}
