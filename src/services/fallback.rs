use std::future::Future;

use crate::errors::AppResult;
use crate::services::notice::Notifier;

pub const DEMO_DATA_TITLE: &str = "Server unreachable";
pub const DEMO_DATA_DESCRIPTION: &str = "Showing demo data for now";

/// Runs a read against the API and substitutes `fallback` on any failure.
///
/// The error is logged and an informational notice is published; the caller
/// always gets data back.
pub async fn with_fallback<T, Fut, F>(
    notifier: &Notifier,
    operation: &str,
    call: Fut,
    fallback: F,
) -> T
where
    Fut: Future<Output = AppResult<T>>,
    F: FnOnce() -> T,
{
    match call.await {
        Ok(data) => data,
        Err(err) => {
            log::warn!("{} failed, using demo data: {}", operation, err);
            notifier.info(DEMO_DATA_TITLE, DEMO_DATA_DESCRIPTION);
            fallback()
        }
    }
}

/// Write paths do not fall back: the failure is surfaced and returned.
pub fn report_failure<T>(notifier: &Notifier, operation: &str, result: AppResult<T>) -> AppResult<T> {
    if let Err(err) = &result {
        log::error!("{} failed: {}", operation, err);
        notifier.destructive(format!("{} failed", operation), err.to_string());
    }
    result
}
