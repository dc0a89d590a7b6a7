//! 從 CSV 檔案讀取日線資料的提供者
//!
//! 資料目錄下每個代碼一個檔案 `{TICKER}.csv`，欄位為 `Date,Adj Close,Volume`。

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::provider::{restrict_to_range, MarketDataProvider, ProviderError, ProviderResult};
use crate::domain_types::{PriceTable, TradingRow};
use crate::utils::parse_date;

/// CSV 檔案中的單筆記錄
#[derive(Debug, Deserialize)]
struct CsvDailyRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Adj Close")]
    adjusted_close: f64,
    #[serde(rename = "Volume")]
    volume: f64,
}

/// CSV 行情資料提供者
#[derive(Debug, Clone)]
pub struct CsvDataProvider {
    directory: PathBuf,
}

impl CsvDataProvider {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// 代碼對應的檔案路徑
    pub fn file_path(&self, ticker: &str) -> PathBuf {
        self.directory.join(format!("{}.csv", ticker.to_uppercase()))
    }

    /// 讀取整個檔案為價格表
    pub fn load_table(&self, ticker: &str) -> ProviderResult<PriceTable> {
        let path = self.file_path(ticker);
        if !path.exists() {
            return Err(ProviderError::UnknownTicker(ticker.to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<CsvDailyRecord>() {
            let record = result?;
            // 標題為第 1 行
            let line = rows.len() as u64 + 2;
            rows.push(Self::to_trading_row(record, line)?);
        }
        rows.sort_by_key(|row| row.date);

        debug!("從 {} 讀取 {} 筆日線資料", path.display(), rows.len());
        Ok(PriceTable::new(ticker.to_uppercase(), rows)?)
    }

    fn to_trading_row(record: CsvDailyRecord, line: u64) -> ProviderResult<TradingRow> {
        let date = parse_date(&record.date).map_err(|e| ProviderError::Parse {
            line,
            message: format!("無效的日期 '{}': {}", record.date, e),
        })?;

        if !record.adjusted_close.is_finite() {
            return Err(ProviderError::Parse {
                line,
                message: format!("無效的調整後收盤價 {}", record.adjusted_close),
            });
        }

        if !record.volume.is_finite() || record.volume < 0.0 {
            return Err(ProviderError::Parse {
                line,
                message: format!("無效的成交量 {}", record.volume),
            });
        }

        Ok(TradingRow::new(
            date,
            record.adjusted_close,
            record.volume.round() as u64,
        ))
    }
}

#[async_trait]
impl MarketDataProvider for CsvDataProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<PriceTable> {
        let table = self.load_table(ticker)?;
        Ok(restrict_to_range(&table, start, end))
    }
}
