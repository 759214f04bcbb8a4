//! # 统一错误处理模块
//!
//! 定义 qensmodels 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// qensmodels 统一错误类型
#[derive(Error, Debug)]
pub enum QensError {
    // ─────────────────────────────────────────────────────────────
    // 物理参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown parameter '{name}' for model {model}")]
    UnknownParameter { model: String, name: String },

    // ─────────────────────────────────────────────────────────────
    // 数组形状错误
    // ─────────────────────────────────────────────────────────────
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 命令行参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl QensError {
    /// 构造参数错误
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        QensError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// 是否为物理参数错误（拟合程序据此判定该组参数不可用）
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, QensError::InvalidParameter { .. })
    }
}

impl From<ndarray::ShapeError> for QensError {
    fn from(e: ndarray::ShapeError) -> Self {
        QensError::ShapeMismatch(e.to_string())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, QensError>;

/// 参数校验：严格为正
pub(crate) fn ensure_positive(name: &str, value: f64, what: &str) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(QensError::invalid(
            name,
            format!("{}, should be positive (got {})", what, value),
        ))
    }
}

/// 参数校验：非负
pub(crate) fn ensure_non_negative(name: &str, value: f64, what: &str) -> Result<()> {
    // NaN 被拒绝，+inf 可以通过
    if value >= 0.0 && !value.is_nan() {
        Ok(())
    } else {
        Err(QensError::invalid(
            name,
            format!("{}, should be positive or zero (got {})", what, value),
        ))
    }
}
