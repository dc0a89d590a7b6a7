//! 掃描報告 JSON 輸出

use std::io::Write;

use super::csv_export::ReportResult;
use crate::analysis::ScanReport;

/// 將完整掃描報告序列化為 JSON 字串
///
/// 無法計算的指標（NaN）輸出為 `null`。
pub fn to_json(report: &ScanReport) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// 將掃描報告以 JSON 寫入任意輸出
pub fn write_json<W: Write>(report: &ScanReport, mut writer: W) -> ReportResult<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
