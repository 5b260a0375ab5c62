//! 时间显示模块
//!
//! 后端返回 RFC 3339 时间戳，由 serde 解析为 `DateTime<Utc>`；
//! 这里只负责把它们渲染成界面上的文字。

use chrono::{DateTime, Utc};

/// 日期格式，例如 `Mar 1, 2024`
const DAY_FORMAT: &str = "%b %-d, %Y";

/// 格式化为日期
pub fn format_day(ts: &DateTime<Utc>) -> String {
    ts.format(DAY_FORMAT).to_string()
}

/// 缺失时间戳时返回空字符串
pub fn format_day_opt(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_day).unwrap_or_default()
}

/// 将剩余秒数格式化为 `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(format_day(&ts), "Mar 1, 2024");
        assert_eq!(format_day_opt(None), "");
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(300), "5:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(9), "0:09");
    }
}
