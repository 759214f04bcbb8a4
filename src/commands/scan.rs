//! # scan 子命令实现
//!
//! 对一个模型参数的多个取值并行计算 S(q, ω)。
//!
//! ## 功能
//! - 并行计算（rayon），作业数可由 `QENS_JOBS` 环境变量设置
//! - 每个取值输出一个文件：`<model>_<param>_<value>.<ext>`
//! - 已存在的文件默认跳过
//! - 非法参数值（如 σ ≤ 0）记为失败，不中断其余取值
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的 ScanArgs
//! - 使用 `batch/` 模块进行批量处理

use super::{energy_grid, write_spectrum};
use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::scan::ScanArgs;
use crate::cli::sqw::SpectrumFormat;
use crate::utils::output;
use qensmodels::{Profile, QensError, QensModel, Result};

use ndarray::Array1;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 扫描配置（各线程共享）
struct ScanConfig {
    model: Box<dyn QensModel>,
    param: String,
    w: Array1<f64>,
    q: Array1<f64>,
    profile: Profile,
    output_dir: PathBuf,
    format: SpectrumFormat,
    overwrite: bool,
}

/// 执行参数扫描
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("QENS Parameter Scan");

    let model = args.model.build();
    output::print_model(model.as_ref());

    // 参数名在启动线程池之前检查
    model.boxed_clone().set_parameter(&args.param, 0.0)?;

    let values = unique_values(&args.values);
    if values.len() < args.values.len() {
        output::print_warning(&format!(
            "Ignoring {} repeated value(s)",
            args.values.len() - values.len()
        ));
    }
    output::print_info(&format!(
        "Scanning '{}' over {}",
        args.param,
        output::format_values(&values)
    ));

    fs::create_dir_all(&args.output_dir).map_err(|e| QensError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let config = Arc::new(ScanConfig {
        model,
        param: args.param.clone(),
        w: energy_grid(&args.grid)?,
        q: Array1::from_vec(args.grid.q.clone()),
        profile: Profile::new(args.grid.scale, args.grid.center),
        output_dir: args.output_dir.clone(),
        format: args.format,
        overwrite: args.overwrite,
    });

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(values, |value| process_value(*value, &config))?;

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Scan complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed values:");
        for (value, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {} = {}: {}", config.param, value, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 去掉重复取值（按输出文件名中的写法比较），保留首次出现的顺序
fn unique_values(values: &[f64]) -> Vec<f64> {
    let mut seen = HashSet::new();
    values
        .iter()
        .copied()
        .filter(|v| seen.insert(v.to_string()))
        .collect()
}

/// 输出文件名
fn output_file(config: &ScanConfig, value: f64) -> PathBuf {
    config.output_dir.join(format!(
        "{}_{}_{}.{}",
        config.model.name(),
        config.param,
        value,
        config.format.extension()
    ))
}

/// 处理单个参数取值
fn process_value(value: f64, config: &ScanConfig) -> ProcessResult {
    let output_file = output_file(config, value);

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match evaluate(value, config, &output_file) {
        Ok(()) => ProcessResult::Success(output_file.display().to_string()),
        Err(e) => ProcessResult::Failed(value.to_string(), e.to_string()),
    }
}

fn evaluate(value: f64, config: &ScanConfig, output: &Path) -> Result<()> {
    let mut model = config.model.boxed_clone();
    model.set_parameter(&config.param, value)?;
    let sqw = model.sqw(&config.w, &config.q, config.profile)?;
    write_spectrum(config.format, &config.w, &config.q, &sqw, model.as_ref(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qensmodels::JumpSitesLogNormDist;
    use tempfile::tempdir;

    fn config(dir: PathBuf) -> ScanConfig {
        ScanConfig {
            model: Box::new(JumpSitesLogNormDist::default()),
            param: "sigma".to_string(),
            w: Array1::linspace(-1.0, 1.0, 11),
            q: ndarray::array![0.5, 1.0],
            profile: Profile::default(),
            output_dir: dir,
            format: SpectrumFormat::Csv,
            overwrite: false,
        }
    }

    #[test]
    fn test_process_value_writes_and_skips() {
        let dir = tempdir().unwrap();
        let config = config(dir.path().to_path_buf());

        let first = process_value(0.5, &config);
        assert!(matches!(first, ProcessResult::Success(_)));
        assert!(dir.path().join("jump-sites-log-norm_sigma_0.5.csv").exists());

        let second = process_value(0.5, &config);
        assert!(matches!(second, ProcessResult::Skipped(_)));
    }

    #[test]
    fn test_invalid_value_fails() {
        let dir = tempdir().unwrap();
        let config = config(dir.path().to_path_buf());
        match process_value(-1.0, &config) {
            ProcessResult::Failed(value, err) => {
                assert_eq!(value, "-1");
                assert!(err.contains("sigma"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unique_values() {
        assert_eq!(unique_values(&[0.5, 0.5, 1.0, 0.5]), vec![0.5, 1.0]);
        assert_eq!(unique_values(&[2.0, 1.0, 2.0]), vec![2.0, 1.0]);
        // -0 与 0 写成不同的文件名
        assert_eq!(unique_values(&[0.0, -0.0]).len(), 2);
        assert!(unique_values(&[]).is_empty());
    }

    #[test]
    fn test_scan_in_parallel() {
        let dir = tempdir().unwrap();
        let config = config(dir.path().to_path_buf());
        let result = BatchRunner::new(2)
            .run(vec![0.25, 0.5, 1.0, 0.0], |v| process_value(*v, &config))
            .unwrap();
        assert_eq!(result.success, 3);
        assert_eq!(result.failed, 1);
    }
}
