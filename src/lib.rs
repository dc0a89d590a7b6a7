// 模組定義
pub mod analysis;
pub mod config;
pub mod data_provider;
pub mod domain_types;
pub mod error;
pub mod report;
pub mod utils;

pub use analysis::{align, detect, run, Alignment, BreakoutScanner, EmptyReason, ScanReport, ScanStatus};
pub use error::{ScanError, ScanResult};
