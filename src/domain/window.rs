//! Transaction date window
//!
//! Restricts transaction listings to the last N days.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Inclusive `[from, to]` range passed to the transactions listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    /// Window ending at `now` and spanning `days` days.
    ///
    /// Returns `None` when `days` is zero (no window) or the start would
    /// fall outside the representable date range.
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Option<Self> {
        if days <= 0 {
            return None;
        }
        let from = now.checked_sub_signed(Duration::try_days(days)?)?;
        Some(Self { from, to: now })
    }

    /// Query parameters understood by the Pluggy transactions listing
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("from", self.from.to_rfc3339()),
            ("to", self.to.to_rfc3339()),
        ]
    }
}
