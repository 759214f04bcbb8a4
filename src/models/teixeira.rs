//! # 水分子的 Teixeira 模型
//!
//! 质心做跳跃平动扩散，同时绕质心做各向同性转动扩散，两种运动相互独立。
//! S(q, ω) 是平动与转动散射函数的卷积，Lorentzian 卷积后宽度相加。
//!
//! ## 公式
//! - Γ_t = D·q² / (1 + τ·D·q²)
//! - 通道 0: 权重 j₀²(q·r)，宽度 Γ_t
//! - 通道 l (1..6): 权重 (2l+1)·jₗ²(q·r)，宽度 Γ_t + l(l+1)·D_r
//! - EISF = 0（平动扩散没有弹性项）
//!
//! ## 参考
//! J. Teixeira, M.-C. Bellissent-Funel, S. H. Chen, A. J. Dianoux,
//! Phys. Rev. A 31, 1913 (1985)
//!
//! ## 依赖关系
//! - 使用 `models/diffusion.rs` 的跳跃平动宽度
//! - 使用 `models/rotation.rs` 的转动宽度与结构因子

use crate::error::Result;
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::diffusion::{hwhm_jump_translational_diffusion, JumpTranslationalDiffusion};
use crate::models::rotation::{
    hwhm_isotropic_rotational_diffusion, IsotropicRotationalDiffusion, EXPANSION_ORDER,
};
use crate::models::{unknown_parameter, QensModel};
use crate::spectrum::{self, Profile, Widths};

use ndarray::{s, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterTeixeira {
    /// 平动扩散系数
    pub d: f64,
    /// 平动跳跃之间的驻留时间
    pub res_time: f64,
    /// 转动半径 (Å)
    pub radius: f64,
    /// 转动扩散系数
    pub d_r: f64,
}

impl Default for WaterTeixeira {
    fn default() -> Self {
        WaterTeixeira {
            d: 1.0,
            res_time: 1.0,
            radius: 1.0,
            d_r: 1.0,
        }
    }
}

impl WaterTeixeira {
    pub fn new(d: f64, res_time: f64, radius: f64, d_r: f64) -> Self {
        WaterTeixeira {
            d,
            res_time,
            radius,
            d_r,
        }
    }

    pub fn translation(&self) -> JumpTranslationalDiffusion {
        JumpTranslationalDiffusion::new(self.d, self.res_time)
    }

    pub fn rotation(&self) -> IsotropicRotationalDiffusion {
        IsotropicRotationalDiffusion::new(self.radius, self.d_r)
    }

    pub fn validate(&self) -> Result<()> {
        self.translation().validate()?;
        self.rotation().validate()
    }
}

/// (M, 1 + 6) 通道，EISF 全为 0
pub fn hwhm_water_teixeira(q: impl Into<Grid>, params: &WaterTeixeira) -> Result<Widths> {
    params.validate()?;
    let q = momentum_transfer(q)?;

    let translation = hwhm_jump_translational_diffusion(&q, &params.translation())?;
    let rotation = hwhm_isotropic_rotational_diffusion(&q, &params.rotation())?;

    let m = q.len();
    let mut hwhm = Array2::zeros((m, EXPANSION_ORDER + 1));
    let mut qisf = Array2::zeros((m, EXPANSION_ORDER + 1));

    hwhm.column_mut(0).assign(&translation.hwhm);
    let mut rotational = hwhm.slice_mut(s![.., 1..]);
    rotational.assign(&rotation.hwhm);
    rotational += &translation.hwhm.view().insert_axis(Axis(1));

    qisf.column_mut(0).assign(&rotation.eisf);
    qisf.slice_mut(s![.., 1..]).assign(&rotation.qisf);

    Widths::new(Array1::zeros(m), hwhm, qisf)
}

pub fn sqw_water_teixeira(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &WaterTeixeira,
) -> Result<Sqw> {
    let widths = hwhm_water_teixeira(q, params)?;
    spectrum::assemble(w, profile, &widths)
}

impl QensModel for WaterTeixeira {
    fn name(&self) -> &'static str {
        "water-teixeira"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("d", self.d),
            ("res_time", self.res_time),
            ("radius", self.radius),
            ("d_r", self.d_r),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "d" => self.d = value,
            "res_time" => self.res_time = value,
            "radius" => self.radius = value,
            "d_r" => self.d_r = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        WaterTeixeira::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        hwhm_water_teixeira(q, self)
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}
