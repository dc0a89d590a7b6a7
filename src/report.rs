// report.rs - 突破報告輸出模組
//
// 提供 CSV 匯出、JSON 報告與終端預覽三種輸出。

pub mod csv_export;
pub mod json_export;
pub mod preview;

pub use csv_export::{csv_file_name, to_csv_bytes, write_csv, write_csv_file, ReportError, ReportResult};
pub use json_export::{to_json, write_json};
pub use preview::{preview, DEFAULT_PREVIEW_ROWS};
