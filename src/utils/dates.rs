use chrono::{NaiveDate, NaiveTime, Utc};

use crate::errors::{ErpError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// 解析 `YYYY-MM-DD` 日期
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ErpError::date_parse(format!("Invalid date '{value}': {e}")))
}

/// 解析 `HH:MM` 时间
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|e| ErpError::date_parse(format!("Invalid time '{value}': {e}")))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 某年首尾两天的存储格式，用于按年份过滤日期列
pub fn year_bounds(year: i32) -> (String, String) {
    (format!("{year:04}-01-01"), format!("{year:04}-12-31"))
}

/// 当前日期（UTC）
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 数据库中的 unix 秒转为 UTC 时间
pub fn from_timestamp(ts: i64) -> chrono::DateTime<Utc> {
    chrono::DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-03-01").unwrap();
        assert_eq!(format_date(date), "2025-03-01");
        assert!(parse_date("01/03/2025").is_err());
        assert_eq!(parse_date("2025-02-30").unwrap_err().code(), "E011");
    }

    #[test]
    fn test_parse_time() {
        assert!(parse_time("09:30").unwrap() < parse_time("12:00").unwrap());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_year_bounds_cover_stored_dates() {
        let (first, last) = year_bounds(2025);
        assert_eq!(first, "2025-01-01");
        assert_eq!(last, "2025-12-31");
        let stored = format_date(parse_date("2025-06-15").unwrap());
        assert!(first <= stored && stored <= last);
    }
}
