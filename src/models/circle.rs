//! # 圆上等价位点跳跃模型
//!
//! 粒子在半径为 r 的圆上 N 个等价位点之间跳跃，驻留时间为 τ。
//!
//! ## 公式
//! - 跳跃距离: rₙ = 2r·sin(πn/N), n = 0..N−1
//! - 半高半宽: Γₗ = 2·sin²(πl/N) / τ（l = 0 为弹性项占位，宽度 0）
//! - 结构因子（粉末平均）: Aₗ(q) = (1/N)·Σₙ j₀(q·rₙ)·cos(2πln/N)
//! - EISF = A₀，QISF = (A₁, …, A_{N−1})，且 EISF + ΣQISF = 1
//!
//! ## 依赖关系
//! - 被 `models/lognorm.rs` 用作基础宽度和结构因子
//! - 使用 `special.rs` 的 j₀
//! - 使用 `spectrum.rs` 叠加谱线

use crate::error::{ensure_non_negative, ensure_positive, QensError, Result};
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::{site_count, unknown_parameter, QensModel};
use crate::special::sinc;
use crate::spectrum::{self, Profile, Widths};

use ndarray::{s, Array1, Array2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 圆上等价位点跳跃模型参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalentSitesCircle {
    /// 位点数 N（≥ 2）
    pub n_sites: usize,
    /// 圆半径 (Å)
    pub radius: f64,
    /// 驻留时间
    pub res_time: f64,
}

impl Default for EquivalentSitesCircle {
    fn default() -> Self {
        EquivalentSitesCircle {
            n_sites: 3,
            radius: 1.0,
            res_time: 1.0,
        }
    }
}

impl EquivalentSitesCircle {
    pub fn new(n_sites: usize, radius: f64, res_time: f64) -> Self {
        EquivalentSitesCircle {
            n_sites,
            radius,
            res_time,
        }
    }

    /// 校验顺序：半径、驻留时间、位点数
    pub fn validate(&self) -> Result<()> {
        ensure_positive("radius", self.radius, "radius of the circle")?;
        ensure_non_negative("res_time", self.res_time, "residence time")?;
        if self.n_sites < 2 {
            return Err(QensError::invalid(
                "n_sites",
                format!("the minimum number of sites N is 2 (got {})", self.n_sites),
            ));
        }
        Ok(())
    }
}

/// 位点跳跃模型的特征量
#[derive(Debug, Clone, PartialEq)]
pub struct SiteWidths {
    /// (M, N)，第 0 列为弹性项占位
    pub hwhm: Array2<f64>,
    /// (M,)
    pub eisf: Array1<f64>,
    /// (M, N−1)
    pub qisf: Array2<f64>,
}

impl SiteWidths {
    /// 去掉弹性占位列，展平为通用形式
    pub fn flatten(&self) -> Widths {
        Widths {
            eisf: self.eisf.clone(),
            hwhm: self.hwhm.slice(s![.., 1..]).to_owned(),
            qisf: self.qisf.clone(),
        }
    }
}

/// 计算 HWHM、EISF、QISF
pub fn hwhm_equivalent_sites_circle(
    q: impl Into<Grid>,
    params: &EquivalentSitesCircle,
) -> Result<SiteWidths> {
    params.validate()?;
    let q = momentum_transfer(q)?;
    Ok(site_widths(&q, params))
}

/// 计算 S(q, ω)
pub fn sqw_equivalent_sites_circle(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &EquivalentSitesCircle,
) -> Result<Sqw> {
    let widths = hwhm_equivalent_sites_circle(q, params)?;
    spectrum::assemble(w, profile, &widths.flatten())
}

/// 不做校验的核心计算（调用方已校验参数和 q）
pub(crate) fn site_widths(q: &Array1<f64>, params: &EquivalentSitesCircle) -> SiteWidths {
    let n = params.n_sites;
    let nf = n as f64;

    // 每个 l 的弛豫速率；τ = 0 时准弹性线无限宽
    let rates = Array1::from_shape_fn(n, |l| {
        if l == 0 {
            0.0
        } else {
            2.0 * (PI * l as f64 / nf).sin().powi(2) / params.res_time
        }
    });

    let jump_distance = Array1::from_shape_fn(n, |k| 2.0 * params.radius * (PI * k as f64 / nf).sin());

    // j₀(q·rₙ): (M, N)
    let bessel = Array2::from_shape_fn((q.len(), n), |(i, k)| sinc(q[i] * jump_distance[k]));

    // cos(2πlk/N) 为对称矩阵
    let phase = Array2::from_shape_fn((n, n), |(l, k)| (2.0 * PI * (l * k) as f64 / nf).cos());

    let isf = bessel.dot(&phase) / nf;
    let hwhm = Array2::from_shape_fn((q.len(), n), |(_, l)| rates[l]);

    SiteWidths {
        hwhm,
        eisf: isf.column(0).to_owned(),
        qisf: isf.slice(s![.., 1..]).to_owned(),
    }
}

impl QensModel for EquivalentSitesCircle {
    fn name(&self) -> &'static str {
        "equivalent-sites-circle"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("n_sites", self.n_sites as f64),
            ("radius", self.radius),
            ("res_time", self.res_time),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "n_sites" => self.n_sites = site_count(value)?,
            "radius" => self.radius = value,
            "res_time" => self.res_time = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        EquivalentSitesCircle::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        Ok(hwhm_equivalent_sites_circle(q, self)?.flatten())
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}
