//! # scan 子命令 CLI 定义
//!
//! 对一个模型参数取多个值，并行计算 S(q, ω)，每个值输出一个文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use super::model::ModelCommand;
use super::sqw::{GridArgs, SpectrumFormat};

use clap::Args;
use std::path::PathBuf;

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Name of the model parameter to scan (e.g. sigma, res_time)
    #[arg(short, long)]
    pub param: String,

    /// Parameter values, comma separated
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub values: Vec<f64>,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Output directory
    #[arg(short, long, default_value = "scan")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: SpectrumFormat,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "QENS_JOBS")]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    #[command(subcommand)]
    pub model: ModelCommand,
}
