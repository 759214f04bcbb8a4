//! # QENS 模型模块
//!
//! 每个模型给出 HWHM/EISF/QISF（特征量）和 S(q, ω)。
//!
//! ## 子模块
//! - `circle`: 圆上 N 个等价位点间的跳跃
//! - `distribution`: 弛豫速率的对数正态分布离散化
//! - `lognorm`: 位点跳跃 + 对数正态分布弛豫时间
//! - `diffusion`: 平动扩散（Brownian、跳跃、Chudley-Elliott）
//! - `rotation`: 各向同性转动扩散
//! - `gaussian3d`: 三维 Gaussian 受限扩散
//! - `teixeira`: 水分子的平动 + 转动（Teixeira 模型）
//! - `peaks`: Delta + Lorentzian 经验模型
//!
//! ## 依赖关系
//! - 被 `lib.rs` 导出，被命令行 `commands/` 使用
//! - 使用 `spectrum.rs` 叠加谱线

pub mod circle;
pub mod diffusion;
pub mod distribution;
pub mod gaussian3d;
pub mod lognorm;
pub mod peaks;
pub mod rotation;
pub mod teixeira;

pub use circle::{EquivalentSitesCircle, SiteWidths};
pub use diffusion::{
    BrownianTranslationalDiffusion, ChudleyElliottDiffusion, JumpTranslationalDiffusion,
    LineWidths,
};
pub use distribution::RateDistribution;
pub use gaussian3d::GaussianModel3D;
pub use lognorm::{DistributedWidths, JumpSitesLogNormDist};
pub use peaks::{DeltaLorentz, DeltaTwoLorentz};
pub use rotation::{IsotropicRotationalDiffusion, RotationWidths};
pub use teixeira::WaterTeixeira;

use crate::error::{QensError, Result};
use crate::grid::Sqw;
use crate::spectrum::{self, Profile, Widths};

use ndarray::Array1;

/// QENS 模型的统一接口
///
/// 拟合程序通过参数名读写参数，每次求值都是纯函数调用，
/// 不同线程可同时对不同参数组求值。
pub trait QensModel: Send + Sync + std::fmt::Debug {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 当前参数 (名称, 值)
    fn parameters(&self) -> Vec<(&'static str, f64)>;

    /// 按名称修改参数（不做物理范围校验，求值时统一校验）
    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()>;

    /// 物理范围校验
    fn validate(&self) -> Result<()>;

    /// 展平的 HWHM/EISF/QISF
    fn widths(&self, q: &Array1<f64>) -> Result<Widths>;

    /// 计算 S(q, ω)
    fn sqw(&self, w: &Array1<f64>, q: &Array1<f64>, profile: Profile) -> Result<Sqw> {
        let widths = self.widths(q)?;
        spectrum::assemble(w, profile, &widths)
    }

    /// 复制为新的 trait 对象（批量扫描时每个参数值一份）
    fn boxed_clone(&self) -> Box<dyn QensModel>;
}

impl Clone for Box<dyn QensModel> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// 位点数：必须是非负整数
pub(crate) fn site_count(value: f64) -> Result<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Ok(value as usize)
    } else {
        Err(QensError::invalid(
            "n_sites",
            format!("number of sites should be an integer (got {})", value),
        ))
    }
}

pub(crate) fn unknown_parameter(model: &str, name: &str) -> QensError {
    QensError::UnknownParameter {
        model: model.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_count() {
        assert_eq!(site_count(5.0).unwrap(), 5);
        assert!(site_count(2.5).unwrap_err().is_invalid_parameter());
        assert!(site_count(-1.0).is_err());
        assert!(site_count(f64::NAN).is_err());
    }

    #[test]
    fn test_models_are_interchangeable() {
        let models: Vec<Box<dyn QensModel>> = vec![
            Box::new(JumpSitesLogNormDist::default()),
            Box::new(EquivalentSitesCircle::default()),
            Box::new(BrownianTranslationalDiffusion::default()),
            Box::new(JumpTranslationalDiffusion::default()),
            Box::new(ChudleyElliottDiffusion::default()),
            Box::new(IsotropicRotationalDiffusion::default()),
            Box::new(DeltaLorentz::default()),
            Box::new(DeltaTwoLorentz::default()),
            Box::new(GaussianModel3D::default()),
            Box::new(WaterTeixeira::default()),
        ];

        let w = Array1::linspace(-2.0, 2.0, 41);
        let q = ndarray::array![0.5, 1.0];
        for model in &models {
            model.validate().unwrap();
            let widths = model.widths(&q).unwrap();
            assert_eq!(widths.n_q(), 2, "{}", model.name());
            let sqw = model.sqw(&w, &q, Profile::default()).unwrap();
            assert_eq!(sqw.shape(), &[2, 41], "{}", model.name());
            assert!(sqw.rows().iter().all(|v| v.is_finite() && *v >= 0.0));
        }
    }

    #[test]
    fn test_set_parameter_round_trip() {
        let mut model: Box<dyn QensModel> = Box::new(JumpSitesLogNormDist::default());
        model.set_parameter("sigma", 0.5).unwrap();
        model.set_parameter("n_sites", 4.0).unwrap();
        let params = model.parameters();
        assert!(params.contains(&("sigma", 0.5)));
        assert!(params.contains(&("n_sites", 4.0)));

        let copy = model.clone();
        assert_eq!(copy.parameters(), params);

        let err = model.set_parameter("temperature", 300.0).unwrap_err();
        assert!(matches!(err, QensError::UnknownParameter { .. }));
    }
}
