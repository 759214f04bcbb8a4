//! # 三维 Gaussian 受限扩散
//!
//! 粒子在各向同性谐振势中做扩散（Volino 的 Gaussian 近似），
//! 位移方差为 ⟨u_x²⟩。
//!
//! ## 公式
//! - EISF = exp(−q²⟨u_x²⟩)
//! - QISFₙ = exp(−q²⟨u_x²⟩)·(q²⟨u_x²⟩)ⁿ / n!, n = 1..99
//! - HWHMₙ = n·D / ⟨u_x²⟩
//!
//! QISF 是 Poisson 权重，逐项递推计算，避免阶乘溢出。
//!
//! ## 参考
//! F. Volino, J.-C. Perrin, S. Lyonnard, J. Phys. Chem. B 110, 11217 (2006)
//!
//! ## 依赖关系
//! - 使用 `spectrum.rs` 叠加谱线

use crate::error::{ensure_positive, Result};
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::{unknown_parameter, QensModel};
use crate::spectrum::{self, Profile, Widths};

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// 级数截断项数
pub const SERIES_TERMS: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianModel3D {
    /// 扩散系数
    pub d: f64,
    /// 单方向位移方差 ⟨u_x²⟩ (Å²)
    pub variance_ux: f64,
}

impl Default for GaussianModel3D {
    fn default() -> Self {
        GaussianModel3D {
            d: 1.0,
            variance_ux: 1.0,
        }
    }
}

impl GaussianModel3D {
    pub fn new(d: f64, variance_ux: f64) -> Self {
        GaussianModel3D { d, variance_ux }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("d", self.d, "diffusion coefficient")?;
        ensure_positive("variance_ux", self.variance_ux, "variance of the displacement")
    }
}

pub fn hwhm_gaussian_model_3d(q: impl Into<Grid>, params: &GaussianModel3D) -> Result<Widths> {
    params.validate()?;
    let q = momentum_transfer(q)?;
    let m = q.len();

    let eisf = q.mapv(|x| (-x * x * params.variance_ux).exp());
    let mut qisf = Array2::zeros((m, SERIES_TERMS));
    for (i, mut row) in qisf.axis_iter_mut(Axis(0)).enumerate() {
        let arg = q[i] * q[i] * params.variance_ux;
        let mut term = eisf[i];
        for (n, value) in row.iter_mut().enumerate() {
            term *= arg / (n + 1) as f64;
            *value = term;
        }
    }
    let hwhm = Array2::from_shape_fn((m, SERIES_TERMS), |(_, j)| {
        (j + 1) as f64 * params.d / params.variance_ux
    });

    Widths::new(eisf, hwhm, qisf)
}

pub fn sqw_gaussian_model_3d(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &GaussianModel3D,
) -> Result<Sqw> {
    let widths = hwhm_gaussian_model_3d(q, params)?;
    spectrum::assemble(w, profile, &widths)
}

impl QensModel for GaussianModel3D {
    fn name(&self) -> &'static str {
        "gaussian-3d"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("d", self.d), ("variance_ux", self.variance_ux)]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "d" => self.d = value,
            "variance_ux" => self.variance_ux = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        GaussianModel3D::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        hwhm_gaussian_model_3d(q, self)
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}
