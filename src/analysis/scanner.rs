use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::aligner::{align, Alignment, EmptyReason};
use super::detector::detect;
use crate::data_provider::MarketDataProvider;
use crate::domain_types::{BreakoutParams, EnrichedRow, WindowRequest};
use crate::error::{ScanError, ScanResult};

/// 掃描結果狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    /// 沒有可用資料
    NoData(EmptyReason),
    /// 資料完整但沒有突破日
    NoBreakouts,
    /// 找到突破日
    Found(usize),
}

impl ScanStatus {
    /// 給使用者看的結果訊息
    pub fn message(&self) -> String {
        match self {
            ScanStatus::NoData(reason) => {
                format!("No stock data found. Please check the ticker or date range. ({})", reason)
            }
            ScanStatus::NoBreakouts => "No breakout days found.".to_string(),
            ScanStatus::Found(count) => {
                format!("Breakout analysis completed! {} breakout day(s) found.", count)
            }
        }
    }
}

/// 單次掃描報告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub ticker: String,
    pub status: ScanStatus,
    pub rows: Vec<EnrichedRow>,
}

impl ScanReport {
    pub fn has_breakouts(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<EnrichedRow> {
        self.rows
    }
}

/// 串接對齊器與偵測器的掃描器，本身不持有任何可變狀態
#[derive(Clone)]
pub struct BreakoutScanner {
    provider: Arc<dyn MarketDataProvider>,
}

impl BreakoutScanner {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn MarketDataProvider {
        self.provider.as_ref()
    }

    /// 執行一次完整掃描
    pub async fn run(
        &self,
        request: &WindowRequest,
        params: &BreakoutParams,
        current_date: NaiveDate,
    ) -> ScanResult<ScanReport> {
        params.validate()?;
        if request.holding_period != params.holding_period {
            return Err(ScanError::InvalidParams(format!(
                "請求持有期 {} 與參數持有期 {} 不一致",
                request.holding_period, params.holding_period
            )));
        }

        let table = match align(self.provider.as_ref(), request, current_date).await? {
            Alignment::Ready(table) => table,
            Alignment::Empty(reason) => {
                info!("{} 沒有可用資料: {}", request.ticker, reason);
                return Ok(ScanReport {
                    ticker: request.ticker.clone(),
                    status: ScanStatus::NoData(reason),
                    rows: Vec::new(),
                });
            }
        };

        let rows = detect(&table, params)?;
        let status = if rows.is_empty() {
            ScanStatus::NoBreakouts
        } else {
            ScanStatus::Found(rows.len())
        };
        info!(
            "{} {} ~ {} 掃描完成: {} 個突破日",
            request.ticker,
            request.requested_start,
            request.requested_end,
            rows.len()
        );

        Ok(ScanReport {
            ticker: request.ticker.clone(),
            status,
            rows,
        })
    }
}

/// 一次性掃描的便捷函數
pub async fn run(
    provider: Arc<dyn MarketDataProvider>,
    request: &WindowRequest,
    params: &BreakoutParams,
    current_date: NaiveDate,
) -> ScanResult<Vec<EnrichedRow>> {
    let report = BreakoutScanner::new(provider)
        .run(request, params, current_date)
        .await?;
    Ok(report.into_rows())
}
