//! # sqw 子命令实现
//!
//! 在能量网格上计算所选模型的 S(q, ω)，打印每个 q 的汇总表并写出文件。
//!
//! ## 依赖关系
//! - 使用 `cli/sqw.rs` 定义的 SqwArgs
//! - 使用 `qensmodels` 的模型与导出

use super::{energy_grid, guess_format_from_extension, write_spectrum};
use crate::cli::sqw::SqwArgs;
use crate::utils::output;
use qensmodels::{Profile, QensModel, Result, Sqw, Widths};

use ndarray::Array1;

/// 执行 sqw 计算
pub fn execute(args: SqwArgs) -> Result<()> {
    output::print_header("QENS Spectrum S(q, w)");

    let model = args.model.build();
    output::print_model(model.as_ref());
    model.validate()?;

    let w = energy_grid(&args.grid)?;
    let q = Array1::from_vec(args.grid.q.clone());
    output::print_info(&format!(
        "Energy grid: {} points in [{}, {}]",
        w.len(),
        w.iter().copied().fold(f64::INFINITY, f64::min),
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    ));
    output::print_info(&format!("q values: {}", output::format_values(&args.grid.q)));

    let profile = Profile::new(args.grid.scale, args.grid.center);
    let widths = model.widths(&q)?;
    let sqw = model.sqw(&w, &q, profile)?;

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));
    write_spectrum(format, &w, &q, &sqw, model.as_ref(), &args.output)?;

    print_summary_table(&q, &widths, &sqw);
    output::print_success(&format!("S(q, w) saved to '{}'", args.output.display()));

    Ok(())
}

/// 打印每个 q 的 EISF、ΣQISF 和峰值
fn print_summary_table(q: &Array1<f64>, widths: &Widths, sqw: &Sqw) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "q (Å⁻¹)")]
        q: String,
        #[tabled(rename = "EISF")]
        eisf: String,
        #[tabled(rename = "ΣQISF")]
        qisf: String,
        #[tabled(rename = "Channels")]
        channels: usize,
        #[tabled(rename = "max S")]
        peak: String,
    }

    let qisf_total = widths.total_weight() - &widths.eisf;
    let rows: Vec<SummaryRow> = sqw
        .rows()
        .outer_iter()
        .enumerate()
        .map(|(i, row)| SummaryRow {
            q: format!("{:.3}", q[i]),
            eisf: format!("{:.4}", widths.eisf[i]),
            qisf: format!("{:.4}", qisf_total[i]),
            channels: widths.n_channels(),
            peak: format!("{:.4e}", row.iter().copied().fold(0.0_f64, f64::max)),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Summary for {} q values", rows.len()));
        println!("{}", Table::new(&rows));
    }
}
