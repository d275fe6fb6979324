//! 更新时间生成与格式化

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// 输出文件头部的时间格式，例如 2024年05月01日 08:30
pub const TIMESTAMP_FORMAT: &str = "%Y年%m月%d日 %H:%M";

/// 指定 UTC 偏移（小时）下的当前时间，偏移非法时退回 UTC
pub fn now_with_offset(utc_offset_hours: i32) -> DateTime<FixedOffset> {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset)
}

pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_beijing_time() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let time = offset.with_ymd_and_hms(2024, 5, 1, 8, 30, 59).unwrap();
        assert_eq!(format_timestamp(&time), "2024年05月01日 08:30");
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        assert_eq!(now_with_offset(48).offset().local_minus_utc(), 0);
        assert_eq!(now_with_offset(8).offset().local_minus_utc(), 8 * 3600);
    }
}
