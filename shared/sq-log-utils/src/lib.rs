//! ログユーティリティ（stdのみ）

use std::time::{SystemTime, UNIX_EPOCH};

/// 1レコードの上限（ナロー換算2KiB）。超過分は切り捨て。
pub const MAX_RECORD_BYTES: usize = 2048;

/// UTCのRFC3339（ミリ秒付き）。例: 2025-01-15T10:30:00.123Z
pub fn utc_rfc3339_millis() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();
    let millis = now.subsec_millis();
    let (year, month, day, hour, minute, second) = unix_seconds_to_utc_components(secs);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year, month, day, hour, minute, second, millis
    )
}

/// UTCタイムスタンプ付きのライフサイクル行を作成する。
pub fn lifecycle_line(component: &str, message: &str) -> String {
    let timestamp = utc_rfc3339_millis();
    format!("[{}] [{}] {}\n", timestamp, component, message)
}

/// メッセージを上限バイト数に丸める（UTF-8境界を維持、切り捨てはエラーではない）。
pub fn truncate_record(message: &str) -> &str {
    if message.len() <= MAX_RECORD_BYTES {
        return message;
    }
    let mut end = MAX_RECORD_BYTES;
    while end > 0 && !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}

fn unix_seconds_to_utc_components(secs: u64) -> (i32, u32, u32, u32, u32, u32) {
    let days = (secs / 86_400) as i64;
    let rem = (secs % 86_400) as i64;
    let hour = (rem / 3_600) as u32;
    let minute = ((rem % 3_600) / 60) as u32;
    let second = (rem % 60) as u32;
    let (year, month, day) = civil_from_days(days);
    (year, month, day, hour, minute, second)
}

fn civil_from_days(days: i64) -> (i32, u32, u32) {
    // Howard Hinnant のアルゴリズム
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]
    let year = y + if m <= 2 { 1 } else { 0 };
    (year as i32, m as u32, d as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_line_has_component_and_newline() {
        let line = lifecycle_line("SETUP", "hello");
        assert!(line.contains("[SETUP] hello"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn truncate_record_keeps_short_messages() {
        assert_eq!(truncate_record("short"), "short");
    }

    #[test]
    fn truncate_record_bounds_long_messages() {
        let long = "x".repeat(MAX_RECORD_BYTES * 2);
        assert_eq!(truncate_record(&long).len(), MAX_RECORD_BYTES);
    }

    #[test]
    fn truncate_record_respects_char_boundaries() {
        // 3バイト文字で境界をまたぐケース
        let long = "あ".repeat(MAX_RECORD_BYTES);
        let cut = truncate_record(&long);
        assert!(cut.len() <= MAX_RECORD_BYTES);
        assert!(cut.chars().all(|c| c == 'あ'));
    }
}
