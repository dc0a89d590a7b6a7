//! 交易窗口對齊器
//!
//! 把使用者請求的日曆區間轉換為偵測器所需的交易日子表：
//! 往前保留基準成交量的暖機列，往後保留計算持有期報酬的列。

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::data_provider::MarketDataProvider;
use crate::domain_types::{PriceTable, WindowRequest};
use crate::error::ScanResult;
use crate::utils::{add_business_days, sub_business_days};

/// 基準成交量的滾動窗口（交易日）
pub const BASELINE_WINDOW: usize = 20;

/// 抓取區間往前多取的工作日數，只作為安全邊際
pub const FETCH_LOOKBACK_BUSINESS_DAYS: u32 = 35;

/// 抓取區間在持有期之外往後多取的工作日數
pub const FETCH_LOOKAHEAD_EXTRA_BUSINESS_DAYS: u32 = 10;

/// 對齊結果為空的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    /// 資料提供者回傳錯誤
    ProviderFailed(String),
    /// 資料提供者沒有回傳任何資料
    NoData,
    /// 請求區間沒有任何交易日資料
    OutOfRange,
    /// 計算需要尚未發布的資料
    FutureData { needed: NaiveDate, today: NaiveDate },
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::ProviderFailed(cause) => write!(f, "資料提供者錯誤: {}", cause),
            EmptyReason::NoData => write!(f, "資料提供者沒有回傳任何資料"),
            EmptyReason::OutOfRange => write!(f, "請求區間內沒有可用的交易日資料"),
            EmptyReason::FutureData { needed, today } => {
                write!(f, "需要 {} 的資料，晚於今日 {}", needed, today)
            }
        }
    }
}

/// 對齊結果
#[derive(Debug, Clone, PartialEq)]
pub enum Alignment {
    Ready(PriceTable),
    Empty(EmptyReason),
}

impl Alignment {
    pub fn is_empty(&self) -> bool {
        matches!(self, Alignment::Empty(_))
    }

    /// 轉為價格表，空結果轉為空表
    pub fn into_table(self, ticker: &str) -> PriceTable {
        match self {
            Alignment::Ready(table) => table,
            Alignment::Empty(_) => PriceTable::empty(ticker),
        }
    }
}

/// 向資料提供者請求的日曆區間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    /// 未截斷前的結束日
    pub desired_end: NaiveDate,
    /// 截斷到今日後實際請求的結束日
    pub end: NaiveDate,
}

impl FetchWindow {
    /// 依請求計算抓取區間
    pub fn for_request(request: &WindowRequest, current_date: NaiveDate) -> Self {
        let lookahead = u32::try_from(request.holding_period)
            .unwrap_or(u32::MAX)
            .saturating_add(FETCH_LOOKAHEAD_EXTRA_BUSINESS_DAYS);

        let start = sub_business_days(request.requested_start, FETCH_LOOKBACK_BUSINESS_DAYS);
        let desired_end = add_business_days(request.requested_end, lookahead);

        Self {
            start,
            desired_end,
            end: desired_end.min(current_date),
        }
    }

    /// 抓取區間是否因今日而被截斷
    pub fn is_clamped(&self) -> bool {
        self.end < self.desired_end
    }
}

/// 對齊請求區間並回傳偵測所需的交易日子表
pub async fn align<P>(
    provider: &P,
    request: &WindowRequest,
    current_date: NaiveDate,
) -> ScanResult<Alignment>
where
    P: MarketDataProvider + ?Sized,
{
    request.validate()?;

    let window = FetchWindow::for_request(request, current_date);
    debug!(
        "{} 抓取區間: {} ~ {} (期望結束日 {})",
        request.ticker, window.start, window.end, window.desired_end
    );

    if window.start > window.end {
        return Ok(Alignment::Empty(EmptyReason::FutureData {
            needed: request.requested_start,
            today: current_date,
        }));
    }

    let raw = match provider
        .fetch(&request.ticker, window.start, window.end)
        .await
    {
        Ok(table) => table,
        Err(e) => {
            warn!("{} 從 {} 抓取資料失敗: {}", request.ticker, provider.name(), e);
            return Ok(Alignment::Empty(EmptyReason::ProviderFailed(e.to_string())));
        }
    };

    if raw.is_empty() {
        return Ok(Alignment::Empty(EmptyReason::NoData));
    }

    Ok(slice_for_request(&raw, request, current_date, window.is_clamped()))
}

/// 在已抓取的價格表上做索引對齊
///
/// `fetch_clamped` 表示抓取區間因今日被截斷，此時缺少的持有期列視為尚未發布。
pub fn slice_for_request(
    table: &PriceTable,
    request: &WindowRequest,
    current_date: NaiveDate,
    fetch_clamped: bool,
) -> Alignment {
    let rows = table.rows();
    let Some(last_idx) = rows.len().checked_sub(1) else {
        return Alignment::Empty(EmptyReason::NoData);
    };

    let start_idx = table.lower_bound(request.requested_start);
    let Some(end_idx) = table.last_at_or_before(request.requested_end) else {
        return Alignment::Empty(EmptyReason::OutOfRange);
    };
    if start_idx > last_idx
        || rows[end_idx].date < request.requested_start
        || rows[start_idx].date > request.requested_end
    {
        return Alignment::Empty(EmptyReason::OutOfRange);
    }

    let wanted_end_idx = end_idx.saturating_add(request.holding_period);
    let adjusted_start_idx = start_idx.saturating_sub(BASELINE_WINDOW);
    let adjusted_end_idx = wanted_end_idx.min(last_idx);

    let adjusted_end_date = rows[adjusted_end_idx].date;
    if adjusted_end_date > current_date {
        warn!(
            "{} 調整後結束日 {} 晚於今日 {}",
            request.ticker, adjusted_end_date, current_date
        );
        return Alignment::Empty(EmptyReason::FutureData {
            needed: adjusted_end_date,
            today: current_date,
        });
    }

    if wanted_end_idx > last_idx && fetch_clamped {
        warn!(
            "{} 持有期需要 {} 個交易日的未來資料",
            request.ticker,
            wanted_end_idx - last_idx
        );
        return Alignment::Empty(EmptyReason::FutureData {
            needed: add_business_days(
                rows[last_idx].date,
                u32::try_from(wanted_end_idx - last_idx).unwrap_or(u32::MAX),
            ),
            today: current_date,
        });
    }

    debug!(
        "{} 保留索引 {}..={} ({} ~ {})",
        request.ticker, adjusted_start_idx, adjusted_end_idx, rows[adjusted_start_idx].date, adjusted_end_date
    );

    match table.slice(adjusted_start_idx, adjusted_end_idx) {
        Some(slice) => Alignment::Ready(slice),
        None => Alignment::Empty(EmptyReason::OutOfRange),
    }
}
