//! 突破日 CSV 匯出

use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::domain_types::EnrichedRow;

/// 報告輸出錯誤
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("檔案寫入錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 寫入錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

/// 報告輸出結果類型
pub type ReportResult<T> = Result<T, ReportError>;

/// 匯出檔名，以代碼區分
pub fn csv_file_name(ticker: &str) -> String {
    format!("{}_breakout_days.csv", ticker.trim().to_uppercase())
}

/// 將突破日寫入任意輸出
///
/// 沒有資料列時仍會寫出標題列。
pub fn write_csv<W: Write>(rows: &[EnrichedRow], writer: W) -> ReportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        csv_writer.write_record(HEADERS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 匯出為位元組，供下載使用
pub fn to_csv_bytes(rows: &[EnrichedRow]) -> ReportResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(buffer)
}

/// 匯出到檔案
pub fn write_csv_file(rows: &[EnrichedRow], path: &Path) -> ReportResult<()> {
    let file = File::create(path)?;
    write_csv(rows, file)?;
    info!("已匯出 {} 筆突破日至 {}", rows.len(), path.display());
    Ok(())
}

const HEADERS: [&str; 9] = [
    "Date",
    "Adj Close",
    "Volume",
    "20DayAvgVolume",
    "Return",
    "VolumeBreakout",
    "PriceChange",
    "PriceBreakout",
    "Breakout",
];
