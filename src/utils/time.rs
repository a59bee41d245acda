//! Time utilities: millisecond timestamps as stored on records.

use chrono::{Local, TimeZone, Utc};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a stored timestamp in local time. Out-of-range values are shown
/// raw instead of failing.
pub fn format_millis(ms: i64, fmt: &str) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format(fmt).to_string(),
        None => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn format_uses_pattern() {
        assert_eq!(format_millis(0, "%Y").len(), 4);
    }
}
