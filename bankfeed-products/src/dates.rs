//! Date window helpers shared by the windowed products.

use chrono::{Duration, Utc};

/// Returns `(start, end)` ISO dates covering the trailing `days` days.
pub(crate) fn trailing_window(days: i64) -> (String, String) {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(days);
    (start.to_string(), end.to_string())
}
