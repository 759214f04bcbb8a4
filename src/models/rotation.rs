//! # 各向同性转动扩散
//!
//! 粒子在半径为 r 的球面上做转动扩散（Sears 展开，取前 6 项）。
//!
//! ## 公式
//! - EISF = j₀²(q·r)
//! - QISFₗ = (2l+1)·jₗ²(q·r), l = 1..6
//! - HWHMₗ = l(l+1)·D_r
//!
//! 截断到 l = 6 后 EISF + ΣQISF 略小于 1，q·r 较大时偏差增大。
//!
//! ## 依赖关系
//! - 使用 `special.rs` 的球贝塞尔函数
//! - 使用 `spectrum.rs` 叠加谱线

use crate::error::{ensure_positive, Result};
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::{unknown_parameter, QensModel};
use crate::special::spherical_jn;
use crate::spectrum::{self, Profile, Widths};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// 展开项数
pub const EXPANSION_ORDER: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsotropicRotationalDiffusion {
    /// 转动半径 (Å)
    pub radius: f64,
    /// 转动扩散系数
    pub d_r: f64,
}

impl Default for IsotropicRotationalDiffusion {
    fn default() -> Self {
        IsotropicRotationalDiffusion {
            radius: 1.0,
            d_r: 1.0,
        }
    }
}

impl IsotropicRotationalDiffusion {
    pub fn new(radius: f64, d_r: f64) -> Self {
        IsotropicRotationalDiffusion { radius, d_r }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("radius", self.radius, "radius of rotation")?;
        ensure_positive("d_r", self.d_r, "rotational diffusion coefficient")
    }
}

/// 转动模型的特征量
#[derive(Debug, Clone, PartialEq)]
pub struct RotationWidths {
    /// (M, 6)
    pub hwhm: Array2<f64>,
    /// (M,)
    pub eisf: Array1<f64>,
    /// (M, 6)
    pub qisf: Array2<f64>,
}

impl RotationWidths {
    pub fn flatten(&self) -> Widths {
        Widths {
            eisf: self.eisf.clone(),
            hwhm: self.hwhm.clone(),
            qisf: self.qisf.clone(),
        }
    }
}

pub fn hwhm_isotropic_rotational_diffusion(
    q: impl Into<Grid>,
    params: &IsotropicRotationalDiffusion,
) -> Result<RotationWidths> {
    params.validate()?;
    let q = momentum_transfer(q)?;
    let m = q.len();

    let eisf = q.mapv(|x| spherical_jn(0, x * params.radius).powi(2));
    let qisf = Array2::from_shape_fn((m, EXPANSION_ORDER), |(i, j)| {
        let l = j + 1;
        (2 * l + 1) as f64 * spherical_jn(l, q[i] * params.radius).powi(2)
    });
    let hwhm = Array2::from_shape_fn((m, EXPANSION_ORDER), |(_, j)| {
        let l = (j + 1) as f64;
        l * (l + 1.0) * params.d_r
    });

    Ok(RotationWidths { hwhm, eisf, qisf })
}

pub fn sqw_isotropic_rotational_diffusion(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &IsotropicRotationalDiffusion,
) -> Result<Sqw> {
    let widths = hwhm_isotropic_rotational_diffusion(q, params)?;
    spectrum::assemble(w, profile, &widths.flatten())
}

impl QensModel for IsotropicRotationalDiffusion {
    fn name(&self) -> &'static str {
        "isotropic-rotation"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("radius", self.radius), ("d_r", self.d_r)]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "radius" => self.radius = value,
            "d_r" => self.d_r = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        IsotropicRotationalDiffusion::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        Ok(hwhm_isotropic_rotational_diffusion(q, self)?.flatten())
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}
