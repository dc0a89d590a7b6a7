// analysis.rs - 突破分析模組
//
// 兩階段流程：先由對齊器決定需要的交易日子表，再交給偵測器逐列判定。

pub mod aligner;
pub mod detector;
pub mod scanner;

pub use aligner::{
    align, slice_for_request, Alignment, EmptyReason, FetchWindow, BASELINE_WINDOW,
    FETCH_LOOKAHEAD_EXTRA_BUSINESS_DAYS, FETCH_LOOKBACK_BUSINESS_DAYS,
};
pub use detector::{detect, enrich};
pub use scanner::{run, BreakoutScanner, ScanReport, ScanStatus};
