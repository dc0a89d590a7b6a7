use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 單一交易日的日線資料點
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TradingRow {
    pub date: NaiveDate,
    pub adjusted_close: f64,
    pub volume: u64,
}

impl TradingRow {
    /// 創建新的交易日資料點
    pub fn new(date: NaiveDate, adjusted_close: f64, volume: u64) -> Self {
        Self {
            date,
            adjusted_close,
            volume,
        }
    }
}
