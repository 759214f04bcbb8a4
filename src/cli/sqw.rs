//! # sqw 子命令 CLI 定义
//!
//! 能量/动量转移网格、线形参数、输出格式，后接模型子命令。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用，`GridArgs` 和 `SpectrumFormat` 也被 `cli/scan.rs` 复用
//! - 参数传递给 `commands/sqw.rs`

use super::model::ModelCommand;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 谱数据输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SpectrumFormat {
    /// CSV data file (w, S(q1), S(q2), ...)
    Csv,
    /// XY data file with a commented header
    Xy,
}

impl SpectrumFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SpectrumFormat::Csv => "csv",
            SpectrumFormat::Xy => "xy",
        }
    }
}

/// 网格与线形参数
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Momentum transfer values q (Å⁻¹), comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "1.0")]
    pub q: Vec<f64>,

    /// Energy transfer values, comma separated (overrides --w-range)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub w: Option<Vec<f64>>,

    /// Energy transfer range "min:max"
    #[arg(long, default_value = "-2:2", allow_hyphen_values = true)]
    pub w_range: String,

    /// Energy step for --w-range
    #[arg(long, default_value_t = 0.01)]
    pub w_step: f64,

    /// Overall scale factor
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Center of the peaks
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center: f64,
}

/// sqw 子命令参数
#[derive(Args, Debug)]
pub struct SqwArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Output file
    #[arg(short, long, default_value = "sqw.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<SpectrumFormat>,

    #[command(subcommand)]
    pub model: ModelCommand,
}
