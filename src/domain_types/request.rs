use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};

/// 預設成交量門檻（百分比），200 表示成交量為基準的兩倍
pub const DEFAULT_VOLUME_THRESHOLD_PCT: f64 = 200.0;

/// 預設漲幅門檻（百分比）
pub const DEFAULT_PRICE_CHANGE_THRESHOLD_PCT: f64 = 2.0;

/// 預設持有期（交易日）
pub const DEFAULT_HOLDING_PERIOD: usize = 10;

/// 使用者請求的分析區間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    pub ticker: String,
    pub requested_start: NaiveDate,
    pub requested_end: NaiveDate,
    pub holding_period: usize,
}

impl WindowRequest {
    pub fn new(
        ticker: impl Into<String>,
        requested_start: NaiveDate,
        requested_end: NaiveDate,
        holding_period: usize,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            requested_start,
            requested_end,
            holding_period,
        }
    }

    /// 驗證請求參數
    pub fn validate(&self) -> ScanResult<()> {
        if self.ticker.trim().is_empty() {
            return Err(ScanError::InvalidRequest("股票代碼不可為空".to_string()));
        }
        if self.holding_period == 0 {
            return Err(ScanError::InvalidRequest(
                "持有期必須至少為 1 個交易日".to_string(),
            ));
        }
        if self.requested_start > self.requested_end {
            return Err(ScanError::InvalidRequest(format!(
                "開始日期 {} 晚於結束日期 {}",
                self.requested_start, self.requested_end
            )));
        }
        Ok(())
    }
}

/// 突破判定參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakoutParams {
    pub volume_threshold_pct: f64,
    pub price_change_threshold_pct: f64,
    pub holding_period: usize,
}

impl Default for BreakoutParams {
    fn default() -> Self {
        Self {
            volume_threshold_pct: DEFAULT_VOLUME_THRESHOLD_PCT,
            price_change_threshold_pct: DEFAULT_PRICE_CHANGE_THRESHOLD_PCT,
            holding_period: DEFAULT_HOLDING_PERIOD,
        }
    }
}

impl BreakoutParams {
    pub fn new(
        volume_threshold_pct: f64,
        price_change_threshold_pct: f64,
        holding_period: usize,
    ) -> Self {
        Self {
            volume_threshold_pct,
            price_change_threshold_pct,
            holding_period,
        }
    }

    /// 成交量需超過基準的倍數
    pub fn volume_ratio(&self) -> f64 {
        self.volume_threshold_pct / 100.0
    }

    /// 漲幅門檻的小數形式
    pub fn price_change_ratio(&self) -> f64 {
        self.price_change_threshold_pct / 100.0
    }

    /// 驗證參數
    pub fn validate(&self) -> ScanResult<()> {
        for (name, value) in [
            ("volume_threshold_pct", self.volume_threshold_pct),
            ("price_change_threshold_pct", self.price_change_threshold_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScanError::InvalidParams(format!(
                    "{} 必須為非負有限數值，實際為 {}",
                    name, value
                )));
            }
        }
        if self.holding_period == 0 {
            return Err(ScanError::InvalidParams(
                "holding_period 必須至少為 1".to_string(),
            ));
        }
        Ok(())
    }
}
