use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain_types::trading_row::TradingRow;

/// 價格表結構錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("日期未嚴格遞增: 第 {index} 筆 {date} 不晚於前一筆 {previous}")]
    NotAscending {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("重複的交易日: {0}")]
    DuplicateDate(NaiveDate),
}

/// 單一標的的日線價格表，依日期嚴格遞增排列
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceTable {
    ticker: String,
    rows: Vec<TradingRow>,
}

impl PriceTable {
    /// 創建價格表，日期必須嚴格遞增且不重複
    pub fn new(ticker: impl Into<String>, rows: Vec<TradingRow>) -> Result<Self, TableError> {
        for (index, pair) in rows.windows(2).enumerate() {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(TableError::DuplicateDate(current));
            }
            if current < previous {
                return Err(TableError::NotAscending {
                    index: index + 1,
                    date: current,
                    previous,
                });
            }
        }

        Ok(Self {
            ticker: ticker.into(),
            rows,
        })
    }

    /// 創建空價格表
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            rows: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn rows(&self) -> &[TradingRow] {
        &self.rows
    }

    /// 獲取數據點數量
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 檢查是否為空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|row| row.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.date)
    }

    /// 獲取日期數組
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    /// 第一個日期 >= `date` 的索引（不存在時為 `len()`）
    pub fn lower_bound(&self, date: NaiveDate) -> usize {
        self.rows.partition_point(|row| row.date < date)
    }

    /// 最後一個日期 <= `date` 的索引
    pub fn last_at_or_before(&self, date: NaiveDate) -> Option<usize> {
        self.rows
            .partition_point(|row| row.date <= date)
            .checked_sub(1)
    }

    /// 取出 `[start, end]` 閉區間的子表，索引越界時回傳 `None`
    pub fn slice(&self, start: usize, end: usize) -> Option<PriceTable> {
        if start > end || end >= self.rows.len() {
            return None;
        }

        Some(Self {
            ticker: self.ticker.clone(),
            rows: self.rows[start..=end].to_vec(),
        })
    }
}
