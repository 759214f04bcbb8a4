//! # 谱叠加
//!
//! 所有模型的共同结构：弹性项 + 准弹性 Lorentzian 之和。
//!
//! ## 公式
//! S(q, ω) = EISF(q)·δ(ω − ω₀) + Σⱼ QISFⱼ(q)·L(ω − ω₀, Γⱼ(q))
//! 整体乘以 scale。
//!
//! 各模型把自己的 HWHM/EISF/QISF 展平成 `Widths`（每个 q 一行，
//! 每个准弹性通道一列），由 `assemble` 统一生成 S(q, ω)。
//!
//! ## 依赖关系
//! - 被 `models/` 各模型调用
//! - 使用 `lineshapes.rs` 的线形
//! - 使用 `grid.rs` 的输入转换与输出形状

use crate::error::{QensError, Result};
use crate::grid::{Grid, Sqw};
use crate::lineshapes::{add_delta, add_lorentzian};

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// 线形的公共参数：幅度与中心
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// 幅度因子
    pub scale: f64,
    /// 峰中心（能量转移）
    pub center: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            scale: 1.0,
            center: 0.0,
        }
    }
}

impl Profile {
    pub fn new(scale: f64, center: f64) -> Self {
        Profile { scale, center }
    }
}

/// 展平后的模型特征量
#[derive(Debug, Clone, PartialEq)]
pub struct Widths {
    /// 弹性非相干结构因子 (M,)
    pub eisf: Array1<f64>,
    /// 每个准弹性通道的半高半宽 (M, T)
    pub hwhm: Array2<f64>,
    /// 每个准弹性通道的权重 (M, T)
    pub qisf: Array2<f64>,
}

impl Widths {
    /// 创建并检查形状一致性
    pub fn new(eisf: Array1<f64>, hwhm: Array2<f64>, qisf: Array2<f64>) -> Result<Self> {
        let widths = Widths { eisf, hwhm, qisf };
        widths.check_shapes()?;
        Ok(widths)
    }

    pub fn n_q(&self) -> usize {
        self.eisf.len()
    }

    /// 准弹性通道数
    pub fn n_channels(&self) -> usize {
        self.hwhm.ncols()
    }

    /// 每个 q 的总权重 EISF + ΣQISF
    pub fn total_weight(&self) -> Array1<f64> {
        &self.eisf + &self.qisf.sum_axis(Axis(1))
    }

    fn check_shapes(&self) -> Result<()> {
        if self.hwhm.shape() != self.qisf.shape() {
            return Err(QensError::ShapeMismatch(format!(
                "hwhm {:?} and qisf {:?} must have the same shape",
                self.hwhm.shape(),
                self.qisf.shape()
            )));
        }
        if self.hwhm.nrows() != self.eisf.len() {
            return Err(QensError::ShapeMismatch(format!(
                "eisf has {} q values but hwhm has {} rows",
                self.eisf.len(),
                self.hwhm.nrows()
            )));
        }
        Ok(())
    }
}

/// 叠加弹性项与所有准弹性项，得到 S(q, ω)
pub fn assemble(w: impl Into<Grid>, profile: Profile, widths: &Widths) -> Result<Sqw> {
    widths.check_shapes()?;
    let w = w.into().into_inner();

    let mut sqw = Array2::zeros((widths.n_q(), w.len()));
    for (i, mut row) in sqw.axis_iter_mut(Axis(0)).enumerate() {
        // 弹性项
        add_delta(
            row.view_mut(),
            &w,
            widths.eisf[i] * profile.scale,
            profile.center,
        );

        // 准弹性项
        for (&weight, &hwhm) in widths.qisf.row(i).iter().zip(widths.hwhm.row(i).iter()) {
            add_lorentzian(
                row.view_mut(),
                &w,
                weight * profile.scale,
                profile.center,
                hwhm,
            );
        }
    }

    Ok(Sqw::from_rows(sqw))
}
