use serde::{Deserialize, Serialize};
use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::domain_types::BreakoutParams;

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub data: DataConfig,
    pub scan: ScanDefaults,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.data.validate()?;
        self.scan.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(&self.level, &["trace", "debug", "info", "warn", "error"], "log.level")?;
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 行情資料配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV 日線資料目錄，每個代碼一個檔案
    pub directory: String,
}

impl Validator for DataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.directory, "data.directory")?;

        Ok(())
    }
}

/// 掃描參數預設值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDefaults {
    pub volume_threshold_pct: u32,
    pub price_change_threshold_pct: u32,
    pub holding_period: u32,
    pub preview_rows: usize,
}

impl Validator for ScanDefaults {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.volume_threshold_pct, 100, 500, "scan.volume_threshold_pct")?;
        ValidationUtils::in_range(self.price_change_threshold_pct, 1, 10, "scan.price_change_threshold_pct")?;
        ValidationUtils::in_range(self.holding_period, 1, 30, "scan.holding_period")?;

        Ok(())
    }
}

impl ScanDefaults {
    /// 轉換為突破判定參數
    pub fn to_params(&self) -> BreakoutParams {
        BreakoutParams::new(
            f64::from(self.volume_threshold_pct),
            f64::from(self.price_change_threshold_pct),
            self.holding_period as usize,
        )
    }
}
