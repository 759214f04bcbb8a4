//! # 模型子命令 CLI 定义
//!
//! 每个模型一个子命令，参数默认值取自模型自身的 `Default`。
//!
//! ## 依赖关系
//! - 被 `cli/sqw.rs`, `cli/hwhm.rs`, `cli/scan.rs` 使用
//! - 构造 `qensmodels::models` 中的模型

use clap::{Args, Subcommand};
use qensmodels::models::{
    BrownianTranslationalDiffusion, ChudleyElliottDiffusion, DeltaLorentz, DeltaTwoLorentz,
    EquivalentSitesCircle, GaussianModel3D, IsotropicRotationalDiffusion, JumpSitesLogNormDist,
    JumpTranslationalDiffusion, QensModel, WaterTeixeira,
};

/// 可选模型
#[derive(Subcommand, Debug, Clone)]
pub enum ModelCommand {
    /// Jumps among N sites on a circle, log-normal distribution of relaxation times
    JumpSitesLogNorm(JumpSitesLogNormArgs),

    /// Jumps among N equivalent sites on a circle
    EquivalentSitesCircle(EquivalentSitesCircleArgs),

    /// Brownian translational diffusion
    Brownian(BrownianArgs),

    /// Jump translational diffusion
    JumpTranslational(JumpTranslationalArgs),

    /// Chudley-Elliott jump diffusion
    ChudleyElliott(ChudleyElliottArgs),

    /// Isotropic rotational diffusion on a sphere
    IsotropicRotation(IsotropicRotationArgs),

    /// Gaussian model of localized diffusion in 3D
    #[command(name = "gaussian-3d")]
    Gaussian3d(Gaussian3dArgs),

    /// Water: jump translational plus isotropic rotational diffusion (Teixeira)
    WaterTeixeira(WaterTeixeiraArgs),

    /// Delta function plus one Lorentzian
    DeltaLorentz(DeltaLorentzArgs),

    /// Delta function plus two Lorentzians
    DeltaTwoLorentz(DeltaTwoLorentzArgs),
}

impl ModelCommand {
    /// 构造模型（物理范围在求值时校验）
    pub fn build(&self) -> Box<dyn QensModel> {
        match self {
            ModelCommand::JumpSitesLogNorm(a) => Box::new(JumpSitesLogNormDist::new(
                a.n_sites,
                a.radius,
                a.res_time,
                a.sigma,
            )),
            ModelCommand::EquivalentSitesCircle(a) => {
                Box::new(EquivalentSitesCircle::new(a.n_sites, a.radius, a.res_time))
            }
            ModelCommand::Brownian(a) => Box::new(BrownianTranslationalDiffusion::new(a.d)),
            ModelCommand::JumpTranslational(a) => {
                Box::new(JumpTranslationalDiffusion::new(a.d, a.res_time))
            }
            ModelCommand::ChudleyElliott(a) => {
                Box::new(ChudleyElliottDiffusion::new(a.d, a.jump_length))
            }
            ModelCommand::IsotropicRotation(a) => {
                Box::new(IsotropicRotationalDiffusion::new(a.radius, a.d_r))
            }
            ModelCommand::Gaussian3d(a) => Box::new(GaussianModel3D::new(a.d, a.variance_ux)),
            ModelCommand::WaterTeixeira(a) => Box::new(WaterTeixeira::new(
                a.d,
                a.res_time,
                a.radius,
                a.d_r,
            )),
            ModelCommand::DeltaLorentz(a) => Box::new(DeltaLorentz::new(a.a0, a.hwhm)),
            ModelCommand::DeltaTwoLorentz(a) => {
                Box::new(DeltaTwoLorentz::new(a.a0, a.a1, a.hwhm1, a.hwhm2))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 位点跳跃模型
// ─────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct JumpSitesLogNormArgs {
    /// Number of sites on the circle (>= 2)
    #[arg(long, default_value_t = JumpSitesLogNormDist::default().n_sites)]
    pub n_sites: usize,

    /// Radius of the circle (Å)
    #[arg(long, default_value_t = JumpSitesLogNormDist::default().radius)]
    pub radius: f64,

    /// Mean residence time
    #[arg(long, default_value_t = JumpSitesLogNormDist::default().res_time)]
    pub res_time: f64,

    /// Standard deviation of the log-normal distribution
    #[arg(long, default_value_t = JumpSitesLogNormDist::default().sigma)]
    pub sigma: f64,
}

#[derive(Args, Debug, Clone)]
pub struct EquivalentSitesCircleArgs {
    /// Number of sites on the circle (>= 2)
    #[arg(long, default_value_t = EquivalentSitesCircle::default().n_sites)]
    pub n_sites: usize,

    /// Radius of the circle (Å)
    #[arg(long, default_value_t = EquivalentSitesCircle::default().radius)]
    pub radius: f64,

    /// Residence time
    #[arg(long, default_value_t = EquivalentSitesCircle::default().res_time)]
    pub res_time: f64,
}

// ─────────────────────────────────────────────────────────────
// 平动扩散
// ─────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct BrownianArgs {
    /// Diffusion coefficient
    #[arg(long, default_value_t = BrownianTranslationalDiffusion::default().d)]
    pub d: f64,
}

#[derive(Args, Debug, Clone)]
pub struct JumpTranslationalArgs {
    /// Diffusion coefficient
    #[arg(long, default_value_t = JumpTranslationalDiffusion::default().d)]
    pub d: f64,

    /// Residence time between jumps
    #[arg(long, default_value_t = JumpTranslationalDiffusion::default().res_time)]
    pub res_time: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ChudleyElliottArgs {
    /// Diffusion coefficient
    #[arg(long, default_value_t = ChudleyElliottDiffusion::default().d)]
    pub d: f64,

    /// Jump distance (Å)
    #[arg(long, default_value_t = ChudleyElliottDiffusion::default().jump_length)]
    pub jump_length: f64,
}

// ─────────────────────────────────────────────────────────────
// 转动、组合与经验模型
// ─────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct IsotropicRotationArgs {
    /// Radius of rotation (Å)
    #[arg(long, default_value_t = IsotropicRotationalDiffusion::default().radius)]
    pub radius: f64,

    /// Rotational diffusion coefficient
    #[arg(long, default_value_t = IsotropicRotationalDiffusion::default().d_r)]
    pub d_r: f64,
}

#[derive(Args, Debug, Clone)]
pub struct Gaussian3dArgs {
    /// Diffusion coefficient
    #[arg(long, default_value_t = GaussianModel3D::default().d)]
    pub d: f64,

    /// Variance of the displacement along one direction (Å²)
    #[arg(long, default_value_t = GaussianModel3D::default().variance_ux)]
    pub variance_ux: f64,
}

#[derive(Args, Debug, Clone)]
pub struct WaterTeixeiraArgs {
    /// Translational diffusion coefficient
    #[arg(long, default_value_t = WaterTeixeira::default().d)]
    pub d: f64,

    /// Residence time between translational jumps
    #[arg(long, default_value_t = WaterTeixeira::default().res_time)]
    pub res_time: f64,

    /// Radius of rotation (Å)
    #[arg(long, default_value_t = WaterTeixeira::default().radius)]
    pub radius: f64,

    /// Rotational diffusion coefficient
    #[arg(long, default_value_t = WaterTeixeira::default().d_r)]
    pub d_r: f64,
}

#[derive(Args, Debug, Clone)]
pub struct DeltaLorentzArgs {
    /// Elastic fraction A0 (0..1)
    #[arg(long, default_value_t = DeltaLorentz::default().a0)]
    pub a0: f64,

    /// Half width at half maximum of the Lorentzian
    #[arg(long, default_value_t = DeltaLorentz::default().hwhm)]
    pub hwhm: f64,
}

#[derive(Args, Debug, Clone)]
pub struct DeltaTwoLorentzArgs {
    /// Elastic fraction A0
    #[arg(long, default_value_t = DeltaTwoLorentz::default().a0)]
    pub a0: f64,

    /// Weight of the first Lorentzian A1 (A0 + A1 <= 1)
    #[arg(long, default_value_t = DeltaTwoLorentz::default().a1)]
    pub a1: f64,

    /// HWHM of the first Lorentzian
    #[arg(long, default_value_t = DeltaTwoLorentz::default().hwhm1)]
    pub hwhm1: f64,

    /// HWHM of the second Lorentzian
    #[arg(long, default_value_t = DeltaTwoLorentz::default().hwhm2)]
    pub hwhm2: f64,
}
