//! # hwhm 子命令实现
//!
//! 打印所选模型的 HWHM、EISF、QISF，可选导出全部通道到 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/hwhm.rs` 定义的 HwhmArgs
//! - 使用 `qensmodels::export` 写出 CSV

use crate::cli::hwhm::HwhmArgs;
use crate::utils::output;
use qensmodels::{export, QensModel, Result, Widths};

use ndarray::Array1;

/// 执行 hwhm 计算
pub fn execute(args: HwhmArgs) -> Result<()> {
    output::print_header("QENS Model Widths");

    let model = args.model.build();
    output::print_model(model.as_ref());

    let q = Array1::from_vec(args.q.clone());
    let widths = model.widths(&q)?;

    output::print_info(&format!(
        "{} q values, {} quasi-elastic channels each",
        widths.n_q(),
        widths.n_channels()
    ));
    print_widths_table(&q, &widths, args.top_n);

    if let Some(path) = &args.output {
        export::widths_to_csv(&q, &widths, path)?;
        output::print_success(&format!("Widths saved to '{}'", path.display()));
    }

    Ok(())
}

/// 每个 q 打印权重最大的 top_n 个通道
fn print_widths_table(q: &Array1<f64>, widths: &Widths, top_n: usize) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct WidthRow {
        #[tabled(rename = "q (Å⁻¹)")]
        q: String,
        #[tabled(rename = "Channel")]
        channel: usize,
        #[tabled(rename = "HWHM")]
        hwhm: String,
        #[tabled(rename = "QISF")]
        qisf: String,
        #[tabled(rename = "EISF")]
        eisf: String,
    }

    let mut rows = Vec::new();
    for (i, &qv) in q.iter().enumerate() {
        let mut channels: Vec<usize> = (0..widths.n_channels()).collect();
        channels.sort_by(|&a, &b| widths.qisf[[i, b]].total_cmp(&widths.qisf[[i, a]]));

        for j in channels.into_iter().take(top_n) {
            rows.push(WidthRow {
                q: format!("{:.3}", qv),
                channel: j + 1,
                hwhm: format!("{:.5}", widths.hwhm[[i, j]]),
                qisf: format!("{:.5}", widths.qisf[[i, j]]),
                eisf: format!("{:.5}", widths.eisf[i]),
            });
        }
    }

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
    if widths.n_channels() > top_n {
        output::print_info(&format!(
            "Showing {} of {} channels per q (by weight); use --top-n or --output for all",
            top_n,
            widths.n_channels()
        ));
    }
}
