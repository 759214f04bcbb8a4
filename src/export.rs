//! # 谱数据导出
//!
//! 导出 S(q, ω) 和模型特征量到文本文件。
//!
//! ## 支持格式
//! - CSV: 第一列 w，之后每个 q 一列 S(q=...)
//! - XY: `#` 注释头（模型名、参数、列说明）+ 制表符分隔的数据行
//! - 特征量 CSV: 每个 (q, 通道) 一行：q, channel, hwhm, eisf, qisf
//!
//! ## 依赖关系
//! - 被命令行 `commands/` 调用
//! - 使用 `grid.rs` 的 Sqw、`spectrum.rs` 的 Widths
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{QensError, Result};
use crate::grid::Sqw;
use crate::models::QensModel;
use crate::spectrum::Widths;

use ndarray::Array1;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 特征量 CSV 的一行
#[derive(Debug, Serialize)]
struct WidthRow {
    q: f64,
    channel: usize,
    hwhm: f64,
    eisf: f64,
    qisf: f64,
}

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> QensError + '_ {
    move |e| QensError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    }
}

fn check_columns(w: &Array1<f64>, q: &Array1<f64>, sqw: &Sqw) -> Result<()> {
    let rows = sqw.rows();
    if rows.nrows() != q.len() || rows.ncols() != w.len() {
        return Err(QensError::ShapeMismatch(format!(
            "S(q, w) has shape {:?} but q has {} and w has {} values",
            sqw.shape(),
            q.len(),
            w.len()
        )));
    }
    Ok(())
}

/// 导出 S(q, ω) 为 CSV 格式
pub fn sqw_to_csv(w: &Array1<f64>, q: &Array1<f64>, sqw: &Sqw, output_path: &Path) -> Result<()> {
    check_columns(w, q, sqw)?;
    let rows = sqw.rows();

    let mut wtr = csv::Writer::from_path(output_path).map_err(QensError::CsvError)?;

    let mut header = vec!["w".to_string()];
    header.extend(q.iter().map(|qv| format!("S(q={})", qv)));
    wtr.write_record(&header)?;

    for (k, wv) in w.iter().enumerate() {
        let mut record = vec![format!("{:.6}", wv)];
        record.extend(rows.column(k).iter().map(|s| format!("{:.8e}", s)));
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 S(q, ω) 为 XY 格式
pub fn sqw_to_xy(
    w: &Array1<f64>,
    q: &Array1<f64>,
    sqw: &Sqw,
    model: &dyn QensModel,
    output_path: &Path,
) -> Result<()> {
    check_columns(w, q, sqw)?;
    let rows = sqw.rows();
    let on_error = write_error(output_path);

    let file = File::create(output_path).map_err(&on_error)?;
    let mut out = BufWriter::new(file);

    let params = model
        .parameters()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "# QENS model: {}", model.name()).map_err(&on_error)?;
    writeln!(out, "# Parameters: {}", params).map_err(&on_error)?;
    let columns = q
        .iter()
        .map(|qv| format!("S(q={})", qv))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "# Columns: w, {}", columns).map_err(&on_error)?;
    writeln!(out, "#").map_err(&on_error)?;

    for (k, wv) in w.iter().enumerate() {
        let mut line = format!("{:.6}", wv);
        for s in rows.column(k) {
            line.push_str(&format!("\t{:.8e}", s));
        }
        writeln!(out, "{}", line).map_err(&on_error)?;
    }

    out.flush().map_err(&on_error)?;
    Ok(())
}

/// 导出展平的特征量为 CSV 格式
pub fn widths_to_csv(q: &Array1<f64>, widths: &Widths, output_path: &Path) -> Result<()> {
    if q.len() != widths.n_q() {
        return Err(QensError::ShapeMismatch(format!(
            "{} q values but widths have {} rows",
            q.len(),
            widths.n_q()
        )));
    }

    let mut wtr = csv::Writer::from_path(output_path).map_err(QensError::CsvError)?;

    for (i, &qv) in q.iter().enumerate() {
        for channel in 0..widths.n_channels() {
            wtr.serialize(WidthRow {
                q: qv,
                channel: channel + 1,
                hwhm: widths.hwhm[[i, channel]],
                eisf: widths.eisf[i],
                qisf: widths.qisf[[i, channel]],
            })?;
        }
    }

    wtr.flush().map_err(write_error(output_path))?;
    Ok(())
}
