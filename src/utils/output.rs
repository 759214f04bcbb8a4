//! # 美化输出工具
//!
//! 提供统一的终端输出样式：带颜色标签的消息、标题栏、模型参数列表。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;
use qensmodels::QensModel;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 打印模型名称与参数
pub fn print_model(model: &dyn QensModel) {
    print_info(&format!("Model: {}", model.name().cyan()));
    for (name, value) in model.parameters() {
        println!("    {:<12} {}", name.dimmed(), value);
    }
}

/// 数值列表的简短表示，如 "0.3, 0.4"
pub fn format_values(values: &[f64]) -> String {
    const MAX_SHOWN: usize = 6;
    let shown: Vec<String> = values.iter().take(MAX_SHOWN).map(|v| v.to_string()).collect();
    if values.len() > MAX_SHOWN {
        format!("{}, ... ({} values)", shown.join(", "), values.len())
    } else {
        shown.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_values() {
        assert_eq!(format_values(&[0.3, 0.4]), "0.3, 0.4");
        let many: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert_eq!(format_values(&many), "0, 1, 2, 3, 4, 5, ... (10 values)");
    }
}
