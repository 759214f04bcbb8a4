//! # qensmodels - 准弹性中子散射谱模型命令行工具
//!
//! 计算 QENS 模型的 S(q, ω)、HWHM/EISF/QISF，并支持参数扫描。
//!
//! ## 子命令
//! - `sqw`  - 计算 S(q, ω) 并导出 CSV/XY
//! - `hwhm` - 打印/导出模型的宽度和结构因子
//! - `scan` - 单参数并行扫描
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── batch/     (并行扫描)
//!   ├── utils/      (输出与进度条)
//!   └── qensmodels  (模型库: models/, spectrum, export, error)
//! ```

mod batch;
mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
