use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain_types::{PriceTable, TableError};

/// 行情資料提供者錯誤
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("檔案讀取錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("數值解析錯誤: 第 {line} 行, {message}")]
    Parse { line: u64, message: String },

    #[error("未知的股票代碼: {0}")]
    UnknownTicker(String),

    #[error("價格表結構錯誤: {0}")]
    Table(#[from] TableError),
}

/// 行情資料提供者結果類型
pub type ProviderResult<T> = Result<T, ProviderError>;

/// 行情資料提供者特性
///
/// 回傳 `[start, end]` 閉區間內實際交易日的日線資料，依日期遞增且不重複。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 提供者名稱，用於日誌
    fn name(&self) -> &str;

    /// 抓取日線資料
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<PriceTable>;
}

/// 從完整價格表中截取 `[start, end]` 閉區間
pub(crate) fn restrict_to_range(
    table: &PriceTable,
    start: NaiveDate,
    end: NaiveDate,
) -> PriceTable {
    let from = table.lower_bound(start);
    match table.last_at_or_before(end) {
        Some(to) if from <= to => table
            .slice(from, to)
            .unwrap_or_else(|| PriceTable::empty(table.ticker())),
        _ => PriceTable::empty(table.ticker()),
    }
}
