//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及共用的网格解析和谱文件输出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/` 和 `qensmodels` 库
//! - 子模块: sqw, hwhm, scan

pub mod hwhm;
pub mod scan;
pub mod sqw;

use crate::cli::sqw::{GridArgs, SpectrumFormat};
use crate::cli::Commands;
use qensmodels::export;
use qensmodels::{QensError, QensModel, Result, Sqw};

use ndarray::Array1;
use std::path::Path;

/// 能量网格点数上限
const MAX_GRID_POINTS: usize = 10_000_000;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sqw(args) => sqw::execute(args),
        Commands::Hwhm(args) => hwhm::execute(args),
        Commands::Scan(args) => scan::execute(args),
    }
}

/// 由 `--w` 或 `--w-range`/`--w-step` 构造能量网格
fn energy_grid(grid: &GridArgs) -> Result<Array1<f64>> {
    if let Some(values) = &grid.w {
        if values.is_empty() {
            return Err(QensError::InvalidArgument("--w needs at least one value".into()));
        }
        return Ok(Array1::from_vec(values.clone()));
    }

    let (min, max) = parse_range(&grid.w_range)?;
    if !(grid.w_step > 0.0 && grid.w_step.is_finite()) {
        return Err(QensError::InvalidArgument(format!(
            "--w-step must be positive (got {})",
            grid.w_step
        )));
    }

    let span = ((max - min) / grid.w_step + 1e-9).floor();
    let n_points = if span.is_finite() && span < MAX_GRID_POINTS as f64 {
        (span as usize).checked_add(1)
    } else {
        None
    };
    let n_points = n_points.filter(|n| *n <= MAX_GRID_POINTS).ok_or_else(|| {
        QensError::InvalidArgument(format!(
            "--w-step {} over '{}' exceeds {} grid points",
            grid.w_step, grid.w_range, MAX_GRID_POINTS
        ))
    })?;
    Ok(Array1::from_shape_fn(n_points, |i| min + i as f64 * grid.w_step))
}

/// 解析能量范围 "min:max"
fn parse_range(range: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = range.split(':').collect();
    if parts.len() != 2 {
        return Err(QensError::InvalidRange(range.to_string()));
    }

    let min: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| QensError::InvalidRange(range.to_string()))?;
    let max: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| QensError::InvalidRange(range.to_string()))?;

    if !(min.is_finite() && max.is_finite()) || max <= min {
        return Err(QensError::InvalidRange(format!("{} (must be min < max)", range)));
    }

    Ok((min, max))
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> SpectrumFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("xy") | Some("dat") | Some("txt") => SpectrumFormat::Xy,
        _ => SpectrumFormat::Csv,
    }
}

/// 按格式写出谱文件
fn write_spectrum(
    format: SpectrumFormat,
    w: &Array1<f64>,
    q: &Array1<f64>,
    sqw: &Sqw,
    model: &dyn QensModel,
    output: &Path,
) -> Result<()> {
    match format {
        SpectrumFormat::Csv => export::sqw_to_csv(w, q, sqw, output),
        SpectrumFormat::Xy => export::sqw_to_xy(w, q, sqw, model, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: Option<Vec<f64>>, w_range: &str, w_step: f64) -> GridArgs {
        GridArgs {
            q: vec![1.0],
            w,
            w_range: w_range.to_string(),
            w_step,
            scale: 1.0,
            center: 0.0,
        }
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("-2:2").unwrap(), (-2.0, 2.0));
        assert_eq!(parse_range(" -0.5 : 1.5 ").unwrap(), (-0.5, 1.5));
        assert!(parse_range("2:-2").is_err());
        assert!(parse_range("-2-2").is_err());
        assert!(parse_range("a:b").is_err());
    }

    #[test]
    fn test_energy_grid_from_range() {
        let w = energy_grid(&grid(None, "-1:1", 0.5)).unwrap();
        assert_eq!(w.len(), 5);
        assert_eq!(w[0], -1.0);
        assert!((w[4] - 1.0).abs() < 1e-12);

        let w = energy_grid(&grid(None, "-2:2", 0.01)).unwrap();
        assert_eq!(w.len(), 401);

        assert!(energy_grid(&grid(None, "-1:1", 0.0)).is_err());
    }

    #[test]
    fn test_energy_grid_rejects_tiny_step() {
        for step in [1e-300, 1e-9, f64::MIN_POSITIVE] {
            assert!(matches!(
                energy_grid(&grid(None, "-2:2", step)),
                Err(QensError::InvalidArgument(_))
            ));
        }
        // 恰好在上限以内
        let w = energy_grid(&grid(None, "0:1", 1e-6)).unwrap();
        assert_eq!(w.len(), 1_000_001);
    }

    #[test]
    fn test_energy_grid_from_list() {
        let w = energy_grid(&grid(Some(vec![1.0, 2.0, 3.0]), "-1:1", 0.5)).unwrap();
        assert_eq!(w.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format_from_extension(Path::new("a.XY")), SpectrumFormat::Xy);
        assert_eq!(guess_format_from_extension(Path::new("a.dat")), SpectrumFormat::Xy);
        assert_eq!(guess_format_from_extension(Path::new("a.csv")), SpectrumFormat::Csv);
        assert_eq!(guess_format_from_extension(Path::new("noext")), SpectrumFormat::Csv);
    }
}
