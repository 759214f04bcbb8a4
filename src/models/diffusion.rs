//! # 平动扩散模型
//!
//! 三个单 Lorentzian 模型，只有 HWHM 随 q 的关系不同：
//!
//! | 模型 | HWHM Γ(q) |
//! |------|-----------|
//! | Brownian | D·q² |
//! | 跳跃扩散 | D·q² / (1 + τ·D·q²) |
//! | Chudley-Elliott | 6D·(1 − sin(qL)/(qL)) / L² |
//!
//! EISF = 0，QISF = 1。
//!
//! ## 依赖关系
//! - 使用 `special.rs` 的 sinc
//! - 使用 `spectrum.rs` 叠加谱线

use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::{unknown_parameter, QensModel};
use crate::special::sinc;
use crate::spectrum::{self, Profile, Widths};

use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

/// 单 Lorentzian 模型的特征量，均为 (M,)
#[derive(Debug, Clone, PartialEq)]
pub struct LineWidths {
    pub hwhm: Array1<f64>,
    pub eisf: Array1<f64>,
    pub qisf: Array1<f64>,
}

impl LineWidths {
    fn from_hwhm(hwhm: Array1<f64>) -> Self {
        let n = hwhm.len();
        LineWidths {
            hwhm,
            eisf: Array1::zeros(n),
            qisf: Array1::ones(n),
        }
    }

    pub fn flatten(&self) -> Widths {
        Widths {
            eisf: self.eisf.clone(),
            hwhm: self.hwhm.clone().insert_axis(Axis(1)),
            qisf: self.qisf.clone().insert_axis(Axis(1)),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Brownian 扩散
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrownianTranslationalDiffusion {
    /// 扩散系数
    pub d: f64,
}

impl Default for BrownianTranslationalDiffusion {
    fn default() -> Self {
        BrownianTranslationalDiffusion { d: 1.0 }
    }
}

impl BrownianTranslationalDiffusion {
    pub fn new(d: f64) -> Self {
        BrownianTranslationalDiffusion { d }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("d", self.d, "diffusion coefficient")
    }
}

pub fn hwhm_brownian_translational_diffusion(
    q: impl Into<Grid>,
    params: &BrownianTranslationalDiffusion,
) -> Result<LineWidths> {
    params.validate()?;
    let q = momentum_transfer(q)?;
    Ok(LineWidths::from_hwhm(q.mapv(|x| params.d * x * x)))
}

pub fn sqw_brownian_translational_diffusion(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &BrownianTranslationalDiffusion,
) -> Result<Sqw> {
    let widths = hwhm_brownian_translational_diffusion(q, params)?;
    spectrum::assemble(w, profile, &widths.flatten())
}

impl QensModel for BrownianTranslationalDiffusion {
    fn name(&self) -> &'static str {
        "brownian"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("d", self.d)]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "d" => self.d = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        BrownianTranslationalDiffusion::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        Ok(hwhm_brownian_translational_diffusion(q, self)?.flatten())
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}

// ─────────────────────────────────────────────────────────────
// 跳跃平动扩散
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpTranslationalDiffusion {
    /// 扩散系数
    pub d: f64,
    /// 两次跳跃之间的驻留时间
    pub res_time: f64,
}

impl Default for JumpTranslationalDiffusion {
    fn default() -> Self {
        JumpTranslationalDiffusion {
            d: 0.23,
            res_time: 1.25,
        }
    }
}

impl JumpTranslationalDiffusion {
    pub fn new(d: f64, res_time: f64) -> Self {
        JumpTranslationalDiffusion { d, res_time }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("d", self.d, "diffusion coefficient")?;
        ensure_non_negative("res_time", self.res_time, "residence time")
    }
}

pub fn hwhm_jump_translational_diffusion(
    q: impl Into<Grid>,
    params: &JumpTranslationalDiffusion,
) -> Result<LineWidths> {
    params.validate()?;
    let q = momentum_transfer(q)?;
    let hwhm = q.mapv(|x| {
        let dq2 = params.d * x * x;
        dq2 / (1.0 + params.res_time * dq2)
    });
    Ok(LineWidths::from_hwhm(hwhm))
}

pub fn sqw_jump_translational_diffusion(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &JumpTranslationalDiffusion,
) -> Result<Sqw> {
    let widths = hwhm_jump_translational_diffusion(q, params)?;
    spectrum::assemble(w, profile, &widths.flatten())
}

impl QensModel for JumpTranslationalDiffusion {
    fn name(&self) -> &'static str {
        "jump-translational"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("d", self.d), ("res_time", self.res_time)]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "d" => self.d = value,
            "res_time" => self.res_time = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        JumpTranslationalDiffusion::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        Ok(hwhm_jump_translational_diffusion(q, self)?.flatten())
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}

// ─────────────────────────────────────────────────────────────
// Chudley-Elliott 格点跳跃
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChudleyElliottDiffusion {
    /// 扩散系数
    pub d: f64,
    /// 跳跃距离 (Å)
    pub jump_length: f64,
}

impl Default for ChudleyElliottDiffusion {
    fn default() -> Self {
        ChudleyElliottDiffusion {
            d: 0.23,
            jump_length: 1.0,
        }
    }
}

impl ChudleyElliottDiffusion {
    pub fn new(d: f64, jump_length: f64) -> Self {
        ChudleyElliottDiffusion { d, jump_length }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("d", self.d, "diffusion coefficient")?;
        ensure_positive("jump_length", self.jump_length, "jump distance")
    }
}

pub fn hwhm_chudley_elliott_diffusion(
    q: impl Into<Grid>,
    params: &ChudleyElliottDiffusion,
) -> Result<LineWidths> {
    params.validate()?;
    let q = momentum_transfer(q)?;
    let l = params.jump_length;
    let hwhm = q.mapv(|x| 6.0 * params.d * (1.0 - sinc(x * l)) / (l * l));
    Ok(LineWidths::from_hwhm(hwhm))
}

pub fn sqw_chudley_elliott_diffusion(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &ChudleyElliottDiffusion,
) -> Result<Sqw> {
    let widths = hwhm_chudley_elliott_diffusion(q, params)?;
    spectrum::assemble(w, profile, &widths.flatten())
}

impl QensModel for ChudleyElliottDiffusion {
    fn name(&self) -> &'static str {
        "chudley-elliott"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("d", self.d), ("jump_length", self.jump_length)]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "d" => self.d = value,
            "jump_length" => self.jump_length = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        ChudleyElliottDiffusion::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        Ok(hwhm_chudley_elliott_diffusion(q, self)?.flatten())
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}
