//! 突破日偵測器
//!
//! 對已對齊的價格表逐列計算基準成交量、持有期報酬與日漲幅，
//! 只保留成交量與漲幅同時超過門檻的交易日。

use polars::prelude::*;
use tracing::debug;

use super::aligner::BASELINE_WINDOW;
use crate::domain_types::{BreakoutParams, EnrichedRow, PriceTable};
use crate::error::ScanResult;

const ROW: &str = "row";
const CLOSE: &str = "Adj Close";
const VOLUME: &str = "Volume";
const PREVIOUS_CLOSE: &str = "PrevClose";
const FORWARD_CLOSE: &str = "ForwardClose";
const BASELINE: &str = "20DayAvgVolume";
const FORWARD_RETURN: &str = "Return";
const PRICE_CHANGE: &str = "PriceChange";
const VOLUME_BREAKOUT: &str = "VolumeBreakout";
const PRICE_BREAKOUT: &str = "PriceBreakout";

/// 有限且為正，可作為相對變動的分母
fn positive(expr: Expr) -> Expr {
    expr.clone().is_finite().and(expr.gt(lit(0.0)))
}

/// `from` 到 `to` 的相對變動，分母不可用時為 NaN
fn relative_change(from: &str, to: &str) -> Expr {
    when(positive(col(from)))
        .then((col(to) - col(from)) / col(from))
        .otherwise(lit(f64::NAN))
}

/// 建立價格表的指標欄位
///
/// 基準為前 20 列（不含當日）成交量均值；缺少基準或持有期收盤價的列被濾除。
fn indicator_frame(table: &PriceTable, params: &BreakoutParams) -> PolarsResult<DataFrame> {
    let rows = table.rows();
    let row_index: Vec<u32> = (0..rows.len() as u32).collect();
    let closes: Vec<f64> = rows.iter().map(|row| row.adjusted_close).collect();
    let volumes: Vec<f64> = rows.iter().map(|row| row.volume as f64).collect();

    let frame = df!(
        ROW => row_index,
        CLOSE => closes,
        VOLUME => volumes
    )?;

    let holding_period = params.holding_period as i64;
    let usable = positive(col(BASELINE))
        .and(positive(col(CLOSE)))
        .and(positive(col(PREVIOUS_CLOSE)))
        .and(positive(col(FORWARD_CLOSE)));

    frame
        .lazy()
        .with_columns([
            col(VOLUME)
                .shift(lit(1))
                .rolling_mean(RollingOptionsFixedWindow {
                    window_size: BASELINE_WINDOW,
                    min_periods: BASELINE_WINDOW,
                    ..Default::default()
                })
                .alias(BASELINE),
            col(CLOSE).shift(lit(1)).alias(PREVIOUS_CLOSE),
            col(CLOSE).shift(lit(-holding_period)).alias(FORWARD_CLOSE),
        ])
        .filter(
            col(BASELINE)
                .is_not_null()
                .and(col(FORWARD_CLOSE).is_not_null()),
        )
        .with_columns([
            relative_change(CLOSE, FORWARD_CLOSE).alias(FORWARD_RETURN),
            relative_change(PREVIOUS_CLOSE, CLOSE).alias(PRICE_CHANGE),
        ])
        .with_columns([
            usable
                .clone()
                .and(col(VOLUME).gt(col(BASELINE) * lit(params.volume_ratio())))
                .alias(VOLUME_BREAKOUT),
            usable
                .and(col(PRICE_CHANGE).gt(lit(params.price_change_ratio())))
                .alias(PRICE_BREAKOUT),
        ])
        .collect()
}

fn float_column(frame: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(frame
        .column(name)?
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

fn flag_column(frame: &DataFrame, name: &str) -> PolarsResult<Vec<bool>> {
    Ok(frame
        .column(name)?
        .bool()?
        .into_iter()
        .map(|value| value.unwrap_or(false))
        .collect())
}

/// 計算所有具備完整基準與持有期資料的列
///
/// 前 `BASELINE_WINDOW` 列與最後 `holding_period` 列因資料不足而被捨棄。
/// 收盤價或基準不可用的列保留，但兩個突破旗標皆為 `false`，無法計算的指標為 NaN。
pub fn enrich(table: &PriceTable, params: &BreakoutParams) -> ScanResult<Vec<EnrichedRow>> {
    params.validate()?;

    let rows = table.rows();
    if rows.len() <= BASELINE_WINDOW + params.holding_period {
        return Ok(Vec::new());
    }

    let frame = indicator_frame(table, params)?;
    let indices = frame.column(ROW)?.u32()?;
    let baselines = float_column(&frame, BASELINE)?;
    let forward_returns = float_column(&frame, FORWARD_RETURN)?;
    let price_changes = float_column(&frame, PRICE_CHANGE)?;
    let volume_flags = flag_column(&frame, VOLUME_BREAKOUT)?;
    let price_flags = flag_column(&frame, PRICE_BREAKOUT)?;

    let enriched = indices
        .into_iter()
        .enumerate()
        .filter_map(|(position, index)| {
            let row = rows.get(index? as usize)?;
            let volume_breakout = volume_flags[position];
            let price_breakout = price_flags[position];

            Some(EnrichedRow {
                date: row.date,
                adjusted_close: row.adjusted_close,
                volume: row.volume,
                baseline_volume: baselines[position],
                forward_return: forward_returns[position],
                volume_breakout,
                price_change_pct: price_changes[position],
                price_breakout,
                breakout: volume_breakout && price_breakout,
            })
        })
        .collect();

    Ok(enriched)
}

/// 偵測突破日，依日期遞增回傳
pub fn detect(table: &PriceTable, params: &BreakoutParams) -> ScanResult<Vec<EnrichedRow>> {
    let enriched = enrich(table, params)?;
    let evaluated = enriched.len();
    let breakouts: Vec<EnrichedRow> = enriched.into_iter().filter(|row| row.breakout).collect();

    debug!(
        "{} 評估 {} 列，突破 {} 列 (成交量門檻 {}%, 漲幅門檻 {}%, 持有 {} 日)",
        table.ticker(),
        evaluated,
        breakouts.len(),
        params.volume_threshold_pct,
        params.price_change_threshold_pct,
        params.holding_period
    );

    Ok(breakouts)
}
