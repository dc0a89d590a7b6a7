use polars::prelude::PolarsError;
use thiserror::Error;

/// 掃描流程錯誤類型
///
/// 呼叫端違反契約或指標計算失敗；資料不足以 `EmptyReason` 結構化回報。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// 無效的分析區間請求
    #[error("無效的請求: {0}")]
    InvalidRequest(String),

    /// 無效的突破判定參數
    #[error("無效的參數: {0}")]
    InvalidParams(String),

    /// 指標計算錯誤
    #[error("指標計算失敗: {0}")]
    Compute(String),
}

impl From<PolarsError> for ScanError {
    fn from(err: PolarsError) -> Self {
        ScanError::Compute(err.to_string())
    }
}

/// 掃描結果類型別名
pub type ScanResult<T> = Result<T, ScanError>;
