use chrono::NaiveDate;
use serde::Serialize;

/// 附帶衍生欄位的交易日資料，欄位名稱即 CSV 匯出的標題
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EnrichedRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Adj Close")]
    pub adjusted_close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
    #[serde(rename = "20DayAvgVolume")]
    pub baseline_volume: f64,
    #[serde(rename = "Return")]
    pub forward_return: f64,
    #[serde(rename = "VolumeBreakout")]
    pub volume_breakout: bool,
    #[serde(rename = "PriceChange")]
    pub price_change_pct: f64,
    #[serde(rename = "PriceBreakout")]
    pub price_breakout: bool,
    #[serde(rename = "Breakout")]
    pub breakout: bool,
}

