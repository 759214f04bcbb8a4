//! # Delta + Lorentzian 经验模型
//!
//! 宽度与 q 无关的唯象线形，常用于拟合前的初步分析：
//! - `DeltaLorentz`: A₀·δ + (1−A₀)·L(Γ)
//! - `DeltaTwoLorentz`: A₀·δ + A₁·L(Γ₁) + (1−A₀−A₁)·L(Γ₂)
//!
//! 每个 q 行完全相同。
//!
//! ## 依赖关系
//! - 使用 `spectrum.rs` 叠加谱线

use crate::error::{ensure_non_negative, QensError, Result};
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::{unknown_parameter, QensModel};
use crate::spectrum::{self, Profile, Widths};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

fn ensure_fraction(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(QensError::invalid(
            name,
            format!("weight must be within [0, 1] (got {})", value),
        ))
    }
}

/// 每个 q 重复同一组 (权重, 宽度)
fn repeated(n_q: usize, eisf: f64, channels: &[(f64, f64)]) -> Widths {
    let t = channels.len();
    Widths {
        eisf: Array1::from_elem(n_q, eisf),
        hwhm: Array2::from_shape_fn((n_q, t), |(_, j)| channels[j].1),
        qisf: Array2::from_shape_fn((n_q, t), |(_, j)| channels[j].0),
    }
}

// ─────────────────────────────────────────────────────────────
// Delta + Lorentzian
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaLorentz {
    /// 弹性分数 A₀
    pub a0: f64,
    /// Lorentzian 半高半宽
    pub hwhm: f64,
}

impl Default for DeltaLorentz {
    fn default() -> Self {
        DeltaLorentz { a0: 0.0, hwhm: 1.0 }
    }
}

impl DeltaLorentz {
    pub fn new(a0: f64, hwhm: f64) -> Self {
        DeltaLorentz { a0, hwhm }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_fraction("a0", self.a0)?;
        ensure_non_negative("hwhm", self.hwhm, "half width at half maximum")
    }
}

pub fn sqw_delta_lorentz(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &DeltaLorentz,
) -> Result<Sqw> {
    let q = momentum_transfer(q)?;
    let widths = QensModel::widths(params, &q)?;
    spectrum::assemble(w, profile, &widths)
}

impl QensModel for DeltaLorentz {
    fn name(&self) -> &'static str {
        "delta-lorentz"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("a0", self.a0), ("hwhm", self.hwhm)]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "a0" => self.a0 = value,
            "hwhm" => self.hwhm = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        DeltaLorentz::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        self.validate()?;
        let q = momentum_transfer(q)?;
        Ok(repeated(q.len(), self.a0, &[(1.0 - self.a0, self.hwhm)]))
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}

// ─────────────────────────────────────────────────────────────
// Delta + 两个 Lorentzian
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaTwoLorentz {
    /// 弹性分数 A₀
    pub a0: f64,
    /// 第一个 Lorentzian 的权重 A₁
    pub a1: f64,
    pub hwhm1: f64,
    pub hwhm2: f64,
}

impl Default for DeltaTwoLorentz {
    fn default() -> Self {
        DeltaTwoLorentz {
            a0: 0.0,
            a1: 0.0,
            hwhm1: 1.0,
            hwhm2: 1.0,
        }
    }
}

impl DeltaTwoLorentz {
    pub fn new(a0: f64, a1: f64, hwhm1: f64, hwhm2: f64) -> Self {
        DeltaTwoLorentz {
            a0,
            a1,
            hwhm1,
            hwhm2,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_fraction("a0", self.a0)?;
        ensure_fraction("a1", self.a1)?;
        if self.a0 + self.a1 > 1.0 {
            return Err(QensError::invalid(
                "a1",
                format!("a0 + a1 must not exceed 1 (got {})", self.a0 + self.a1),
            ));
        }
        ensure_non_negative("hwhm1", self.hwhm1, "half width at half maximum")?;
        ensure_non_negative("hwhm2", self.hwhm2, "half width at half maximum")
    }
}

pub fn sqw_delta_two_lorentz(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &DeltaTwoLorentz,
) -> Result<Sqw> {
    let q = momentum_transfer(q)?;
    let widths = QensModel::widths(params, &q)?;
    spectrum::assemble(w, profile, &widths)
}

impl QensModel for DeltaTwoLorentz {
    fn name(&self) -> &'static str {
        "delta-two-lorentz"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("a0", self.a0),
            ("a1", self.a1),
            ("hwhm1", self.hwhm1),
            ("hwhm2", self.hwhm2),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "a0" => self.a0 = value,
            "a1" => self.a1 = value,
            "hwhm1" => self.hwhm1 = value,
            "hwhm2" => self.hwhm2 = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        DeltaTwoLorentz::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        self.validate()?;
        let q = momentum_transfer(q)?;
        Ok(repeated(
            q.len(),
            self.a0,
            &[
                (self.a1, self.hwhm1),
                (1.0 - self.a0 - self.a1, self.hwhm2),
            ],
        ))
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}
