//! # hwhm 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/hwhm.rs`

use super::model::ModelCommand;

use clap::Args;
use std::path::PathBuf;

/// hwhm 子命令参数
#[derive(Args, Debug)]
pub struct HwhmArgs {
    /// Momentum transfer values q (Å⁻¹), comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "1.0")]
    pub q: Vec<f64>,

    /// Number of channels to print per q value
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Write all channels to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub model: ModelCommand,
}
