//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `sqw`: 计算 S(q, ω) 并导出
//! - `hwhm`: 打印/导出 HWHM、EISF、QISF
//! - `scan`: 对单个参数并行扫描，每个取值输出一个文件
//!
//! 三个命令的最后一个位置参数都是模型子命令（见 `model.rs`）。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: model, sqw, hwhm, scan

pub mod hwhm;
pub mod model;
pub mod scan;
pub mod sqw;

use clap::{Parser, Subcommand};

/// qensmodels - 准弹性中子散射谱模型
#[derive(Parser)]
#[command(name = "qensmodels")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Quasi-elastic neutron scattering model spectra", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate S(q, w) of a model on an energy grid
    Sqw(sqw::SqwArgs),

    /// Print the widths and structure factors of a model
    Hwhm(hwhm::HwhmArgs),

    /// Evaluate a model for several values of one parameter in parallel
    Scan(scan::ScanArgs),
}
