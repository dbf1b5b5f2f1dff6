// SPDX-License-Identifier: Apache-2.0

use phonebook_core::Error;
use tracing::{debug, error};

use crate::cursor::{decode_page_token, encode_page_token};
use crate::filters::{ListPageRequest, ListPageResponse};
use crate::limits::PageLimits;
use crate::store::{PhoneStore, RecordQuery, StoreError};

/// Fetches one id-descending page.
///
/// Reads `size + 1` rows to learn whether another page exists without a
/// second query. The collection count is computed only for first-page
/// requests (empty token); continuation pages reuse the caller's count.
pub fn list_page(
    store: &dyn PhoneStore,
    req: &ListPageRequest,
    limits: &PageLimits,
) -> Result<ListPageResponse, Error> {
    let page_size = limits.clamp_page_size(req.page_size);
    let before_id = decode_page_token(&req.page_token)?;

    let collection_count = if req.page_token.is_empty() {
        Some(
            store
                .count(&req.filter)
                .map_err(|e| storage_failure("count", e))?,
        )
    } else {
        None
    };

    let mut records = store
        .query(&RecordQuery {
            filter: &req.filter,
            before_id,
            limit: page_size + 1,
        })
        .map_err(|e| storage_failure("list", e))?;

    let has_more = records.len() > page_size;
    records.truncate(page_size);
    let next_page_token = if has_more {
        records.last().map(|r| encode_page_token(r.id))
    } else {
        None
    };

    debug!(
        page_size,
        returned = records.len(),
        has_more,
        "listed phone page"
    );
    Ok(ListPageResponse {
        records,
        next_page_token,
        collection_count,
    })
}

/// Logs the storage detail and returns the fixed client-facing error.
pub(crate) fn storage_failure(operation: &'static str, err: StoreError) -> Error {
    error!(operation, error = %err, "storage operation failed");
    Error::internal("internal storage error")
}
