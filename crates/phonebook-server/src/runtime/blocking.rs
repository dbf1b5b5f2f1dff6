// SPDX-License-Identifier: Apache-2.0

use phonebook_api::ApiError;
use phonebook_query::PhoneBook;
use tokio::time::timeout;
use tracing::{error, warn};

use crate::AppState;

/// Runs one storage operation on the blocking pool under the SQL timeout.
///
/// On timeout the caller gets `Timeout` right away; the blocking task may
/// still finish, but its result is dropped, so nothing downstream (session
/// state in particular) ever observes it.
pub(crate) async fn run_blocking<T, F>(
    state: &AppState,
    operation: &'static str,
    work: F,
) -> Result<T, ApiError>
where
    F: FnOnce(PhoneBook) -> phonebook_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let book = state.book.clone();
    let task = tokio::task::spawn_blocking(move || work(book));
    match timeout(state.api.sql_timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join_err)) => {
            error!(operation, error = %join_err, "blocking storage task failed");
            Err(ApiError::internal())
        }
        Err(_) => {
            warn!(
                operation,
                timeout_ms = state.api.sql_timeout.as_millis() as u64,
                "storage call timed out"
            );
            Err(ApiError::timeout(operation))
        }
    }
}
