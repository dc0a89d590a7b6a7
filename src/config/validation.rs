use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..={max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證配置區段
pub fn validate_config<T: Validator>(config: &T) -> Result<(), ValidationError> {
    config.validate()
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 數值需落在 `[min, max]` 閉區間
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString,
    {
        if value >= min && value <= max {
            return Ok(());
        }
        Err(ValidationError::RangeError {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }

    /// 字串需為選項之一（不分大小寫）
    pub fn one_of(value: &str, options: &[&str], field: &str) -> Result<(), ValidationError> {
        if options.iter().any(|option| option.eq_ignore_ascii_case(value)) {
            return Ok(());
        }
        Err(ValidationError::InvalidValue(format!(
            "{} 的值 {} 不是有效選項: {}",
            field,
            value,
            options.join("|")
        )))
    }

    /// 必填字串不可為空白
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field.to_string()));
        }
        Ok(())
    }
}
