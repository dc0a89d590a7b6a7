// time_utils.rs
//
// 提供交易日曆相關的工具函數。
// 主要功能：
// 1. 以工作日（週一至週五）為單位位移日期，用於計算抓取緩衝區間
// 2. 解析使用者輸入的日期字串

use chrono::{Datelike, Duration, NaiveDate, ParseResult, Weekday};

/// 日期輸入格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 是否為工作日
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 往後位移 `n` 個工作日
///
/// 週末起算時，第一步會先落在下週一；`n == 0` 時原樣返回。
pub fn add_business_days(date: NaiveDate, n: u32) -> NaiveDate {
    step_business_days(date, n, Duration::days(1))
}

/// 往前位移 `n` 個工作日
///
/// 週末起算時，第一步會先落在上週五；`n == 0` 時原樣返回。
pub fn sub_business_days(date: NaiveDate, n: u32) -> NaiveDate {
    step_business_days(date, n, Duration::days(-1))
}

fn step_business_days(date: NaiveDate, n: u32, step: Duration) -> NaiveDate {
    let mut current = date;
    let mut remaining = n;
    while remaining > 0 {
        current = match current.checked_add_signed(step) {
            Some(next) => next,
            None => return current,
        };
        if is_business_day(current) {
            remaining -= 1;
        }
    }
    current
}

/// 解析 `YYYY-MM-DD` 格式的日期
pub fn parse_date(input: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_detection() {
        assert!(is_business_day(date(2024, 1, 5))); // 週五
        assert!(!is_business_day(date(2024, 1, 6))); // 週六
        assert!(!is_business_day(date(2024, 1, 7))); // 週日
        assert!(is_business_day(date(2024, 1, 8))); // 週一
    }

    #[test]
    fn test_add_business_days_skips_weekends() {
        assert_eq!(add_business_days(date(2024, 1, 5), 1), date(2024, 1, 8));
        assert_eq!(add_business_days(date(2024, 1, 6), 1), date(2024, 1, 8));
        assert_eq!(add_business_days(date(2024, 1, 1), 10), date(2024, 1, 15));
        assert_eq!(add_business_days(date(2024, 1, 3), 0), date(2024, 1, 3));
    }

    #[test]
    fn test_sub_business_days_skips_weekends() {
        assert_eq!(sub_business_days(date(2024, 1, 8), 1), date(2024, 1, 5));
        assert_eq!(sub_business_days(date(2024, 1, 7), 1), date(2024, 1, 5));
        // 2024-01-01 往前 35 個工作日
        assert_eq!(sub_business_days(date(2024, 1, 1), 35), date(2023, 11, 13));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-11-01").unwrap(), date(2024, 11, 1));
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(parse_date("2024/11/01").is_err());
        assert!(parse_date("2023-02-29").is_err());
    }
}
