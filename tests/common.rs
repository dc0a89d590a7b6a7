#![allow(dead_code)]

use async_trait::async_trait;
use breakout_scanner::data_provider::{MarketDataProvider, ProviderError, ProviderResult};
use breakout_scanner::domain_types::{PriceTable, TradingRow};
use breakout_scanner::utils::add_business_days;
use chrono::NaiveDate;
use std::io;

pub const TICKER: &str = "TEST";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// 從 `first` 開始的連續工作日，每列使用對應的收盤價與成交量
pub fn weekday_rows(first: NaiveDate, closes: &[f64], volumes: &[u64]) -> Vec<TradingRow> {
    assert_eq!(closes.len(), volumes.len(), "fixture columns must align");

    let mut day = first;
    closes
        .iter()
        .zip(volumes)
        .map(|(&close, &volume)| {
            let row = TradingRow::new(day, close, volume);
            day = add_business_days(day, 1);
            row
        })
        .collect()
}

pub fn weekday_table(first: NaiveDate, closes: &[f64], volumes: &[u64]) -> PriceTable {
    PriceTable::new(TICKER, weekday_rows(first, closes, volumes)).expect("ascending fixture")
}

/// 價格與成交量皆持平的價格表
pub fn flat_table(first: NaiveDate, len: usize, close: f64, volume: u64) -> PriceTable {
    weekday_table(first, &vec![close; len], &vec![volume; len])
}

/// 20 列持平、第 21 列放量上漲、之後 `tail` 列維持第 21 列收盤價
pub fn spike_table(first: NaiveDate, rise_pct: f64, volume_multiple: u64, tail: usize) -> PriceTable {
    let spike_close = 100.0 * (1.0 + rise_pct / 100.0);

    let mut closes = vec![100.0; 20];
    let mut volumes = vec![1_000; 20];
    closes.push(spike_close);
    volumes.push(1_000 * volume_multiple);
    closes.extend(std::iter::repeat(spike_close).take(tail));
    volumes.extend(std::iter::repeat(1_000).take(tail));

    weekday_table(first, &closes, &volumes)
}

/// 決定性的偽隨機價量序列
pub fn noisy_table(first: NaiveDate, len: usize, seed: u64) -> PriceTable {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let mut close = 50.0;
    let mut closes = Vec::with_capacity(len);
    let mut volumes = Vec::with_capacity(len);
    for _ in 0..len {
        close *= 1.0 + (next() - 0.45) * 0.08;
        closes.push(close);
        volumes.push(10_000 + (next() * 40_000.0) as u64);
    }
    weekday_table(first, &closes, &volumes)
}

/// 永遠失敗的資料提供者
pub struct FailingProvider;

#[async_trait]
impl MarketDataProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self, _ticker: &str, _start: NaiveDate, _end: NaiveDate) -> ProviderResult<PriceTable> {
        Err(ProviderError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "network down")))
    }
}
