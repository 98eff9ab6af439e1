//! savedAt 用の ISO8601 文字列（UTC・ミリ秒・`Z` 付き）

use chrono::{DateTime, SecondsFormat, Utc};

/// Unix epoch ミリ秒を `2026-01-02T03:04:05.678Z` 形式にする
pub fn iso8601_millis(ms: u64) -> String {
    let dt = i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default();
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso8601_millis() {
        assert_eq!(iso8601_millis(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso8601_millis(1_767_323_045_678), "2026-01-02T03:04:05.678Z");
    }
}
