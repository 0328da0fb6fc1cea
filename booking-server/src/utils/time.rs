//! 日期工具函数
//!
//! 日期在文档和接口上一律是 `YYYY-MM-DD` 字符串，解析统一在这里。

use chrono::{Datelike, NaiveDate, Weekday};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// 今天 (服务器本地日期，截断到零点比较用)
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// 当前 Unix 秒 (creationDate / lastEditedOn)
pub fn now_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 店休日: 周一不营业
pub fn is_closed_on(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2026-09-04").unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap()
        );
        assert!(parse_date("04/09/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn mondays_are_closed() {
        // 2026-09-07 is a Monday
        assert!(is_closed_on(NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()));
        assert!(!is_closed_on(NaiveDate::from_ymd_opt(2026, 9, 8).unwrap()));
    }
}
