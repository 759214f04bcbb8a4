//! # 位点跳跃 + 对数正态分布弛豫时间
//!
//! 圆上 N 个等价位点间的跳跃，弛豫速率服从标准差为 σ 的对数正态分布。
//!
//! ## 算法
//! 1. 校验参数（半径、驻留时间、位点数、σ），任何计算之前完成
//! 2. 由 `circle` 得到基础宽度 Γ⁰ (M,N)、EISF (M,)、QISF⁰ (M,N−1)
//! 3. 由 `distribution` 得到 K 个速率倍数 ratio 和权重 g
//! 4. Γ[q,l,k] = Γ⁰[q,l]·ratio[k]（外积）
//! 5. QISF[q,j,k] = QISF⁰[q,j]·g[k]（外积）
//! 6. EISF 不受速率分布影响
//!
//! S(q, ω) = EISF·δ + Σⱼ Σₖ QISF[q,j,k]·L(Γ[q,j+1,k])
//!
//! ## 参考
//! A. Chahid, A. Alegria, J. Colmenero, Macromolecules 27, 3282 (1994)
//!
//! ## 依赖关系
//! - 使用 `models/circle.rs` 的基础宽度与结构因子
//! - 使用 `models/distribution.rs` 的速率分布
//! - 使用 `spectrum.rs` 叠加谱线

use crate::error::{ensure_positive, Result};
use crate::grid::{momentum_transfer, Grid, Sqw};
use crate::models::circle::{self, EquivalentSitesCircle};
use crate::models::distribution;
use crate::models::{site_count, unknown_parameter, QensModel};
use crate::spectrum::{self, Profile, Widths};

use ndarray::{s, Array1, Array2, Array3, Axis, Zip};
use serde::{Deserialize, Serialize};

/// 模型参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpSitesLogNormDist {
    /// 位点数 N（≥ 2）
    pub n_sites: usize,
    /// 圆半径 (Å)
    pub radius: f64,
    /// 平均驻留时间
    pub res_time: f64,
    /// 对数正态分布标准差
    pub sigma: f64,
}

impl Default for JumpSitesLogNormDist {
    fn default() -> Self {
        JumpSitesLogNormDist {
            n_sites: 3,
            radius: 1.0,
            res_time: 1.0,
            sigma: 1.0,
        }
    }
}

impl JumpSitesLogNormDist {
    pub fn new(n_sites: usize, radius: f64, res_time: f64, sigma: f64) -> Self {
        JumpSitesLogNormDist {
            n_sites,
            radius,
            res_time,
            sigma,
        }
    }

    /// 对应的无分布位点模型
    pub fn base(&self) -> EquivalentSitesCircle {
        EquivalentSitesCircle::new(self.n_sites, self.radius, self.res_time)
    }

    pub fn validate(&self) -> Result<()> {
        self.base().validate()?;
        ensure_positive("sigma", self.sigma, "standard deviation of the distribution")
    }
}

/// 展开到速率分布采样维度的特征量
#[derive(Debug, Clone, PartialEq)]
pub struct DistributedWidths {
    /// (M, N, K)，第 1 维下标 0 为弹性项占位
    pub hwhm: Array3<f64>,
    /// (M,)
    pub eisf: Array1<f64>,
    /// (M, N−1, K)
    pub qisf: Array3<f64>,
}

impl DistributedWidths {
    /// 速率分布采样点数 K
    pub fn n_samples(&self) -> usize {
        self.hwhm.len_of(Axis(2))
    }

    /// 去掉弹性占位，(位点, 采样) 两维合并为通道
    pub fn flatten(&self) -> Result<Widths> {
        let (m, n, k) = self.hwhm.dim();
        let channels = n.saturating_sub(1) * k;

        let hwhm = self
            .hwhm
            .slice(s![.., 1.., ..])
            .to_owned()
            .into_shape_with_order((m, channels))?;
        let qisf = self.qisf.to_owned().into_shape_with_order((m, channels))?;

        Widths::new(self.eisf.clone(), hwhm, qisf)
    }
}

/// 计算 HWHM、EISF、QISF
pub fn hwhm_jump_sites_log_norm_dist(
    q: impl Into<Grid>,
    params: &JumpSitesLogNormDist,
) -> Result<DistributedWidths> {
    params.validate()?;
    let q = momentum_transfer(q)?;

    let base = circle::site_widths(&q, &params.base());
    let rates = distribution::log_normal_rates(params.sigma)?;

    let mut hwhm = outer(&base.hwhm, &rates.ratio);
    // σ 很大时 ratio 含 0 和 inf，占位项 0·inf 会得到 NaN
    hwhm.slice_mut(s![.., 0, ..]).fill(0.0);

    Ok(DistributedWidths {
        hwhm,
        eisf: base.eisf,
        qisf: outer(&base.qisf, &rates.weight),
    })
}

/// 计算 S(q, ω)
pub fn sqw_jump_sites_log_norm_dist(
    w: impl Into<Grid>,
    q: impl Into<Grid>,
    profile: Profile,
    params: &JumpSitesLogNormDist,
) -> Result<Sqw> {
    let widths = hwhm_jump_sites_log_norm_dist(q, params)?;
    spectrum::assemble(w, profile, &widths.flatten()?)
}

/// out[i, j, k] = base[i, j]·samples[k]
fn outer(base: &Array2<f64>, samples: &Array1<f64>) -> Array3<f64> {
    let (m, n) = base.dim();
    let mut out = Array3::zeros((m, n, samples.len()));
    Zip::from(out.lanes_mut(Axis(2)))
        .and(base)
        .for_each(|mut lane, &value| {
            lane.assign(samples);
            lane *= value;
        });
    out
}

impl QensModel for JumpSitesLogNormDist {
    fn name(&self) -> &'static str {
        "jump-sites-log-norm"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("n_sites", self.n_sites as f64),
            ("radius", self.radius),
            ("res_time", self.res_time),
            ("sigma", self.sigma),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "n_sites" => self.n_sites = site_count(value)?,
            "radius" => self.radius = value,
            "res_time" => self.res_time = value,
            "sigma" => self.sigma = value,
            _ => return Err(unknown_parameter(self.name(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        JumpSitesLogNormDist::validate(self)
    }

    fn widths(&self, q: &Array1<f64>) -> Result<Widths> {
        hwhm_jump_sites_log_norm_dist(q, self)?.flatten()
    }

    fn boxed_clone(&self) -> Box<dyn QensModel> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::circle::hwhm_equivalent_sites_circle;
    use crate::models::distribution::SAMPLE_COUNT;
    use approx::assert_relative_eq;

    #[test]
    fn test_tensor_shapes() {
        let params = JumpSitesLogNormDist::new(5, 1.0, 1.0, 0.8);
        let widths = hwhm_jump_sites_log_norm_dist([0.2, 0.6, 1.4], &params).unwrap();
        assert_eq!(widths.hwhm.shape(), &[3, 5, SAMPLE_COUNT]);
        assert_eq!(widths.eisf.shape(), &[3]);
        assert_eq!(widths.qisf.shape(), &[3, 4, SAMPLE_COUNT]);
        assert_eq!(widths.n_samples(), SAMPLE_COUNT);

        let flat = widths.flatten().unwrap();
        assert_eq!(flat.hwhm.shape(), &[3, 4 * SAMPLE_COUNT]);
        // 通道顺序 (位点, 采样)
        assert_eq!(flat.hwhm[[1, SAMPLE_COUNT + 2]], widths.hwhm[[1, 2, 2]]);
        assert_eq!(flat.qisf[[2, SAMPLE_COUNT + 2]], widths.qisf[[2, 1, 2]]);
    }

    #[test]
    fn test_central_sample_reproduces_base_widths() {
        let params = JumpSitesLogNormDist::new(4, 0.9, 2.0, 1.3);
        let q = [0.3, 0.9, 1.7];
        let widths = hwhm_jump_sites_log_norm_dist(q, &params).unwrap();
        let base = hwhm_equivalent_sites_circle(q, &params.base()).unwrap();

        let central = SAMPLE_COUNT / 2;
        for i in 0..3 {
            for l in 0..4 {
                assert_relative_eq!(
                    widths.hwhm[[i, l, central]],
                    base.hwhm[[i, l]],
                    epsilon = 1e-12
                );
            }
        }
        assert_eq!(widths.eisf, base.eisf);
    }

    #[test]
    fn test_total_weight_preserved() {
        let params = JumpSitesLogNormDist::new(6, 1.2, 0.5, 0.4);
        let q = [0.0, 0.5, 1.0, 2.0];
        let widths = hwhm_jump_sites_log_norm_dist(q, &params).unwrap();
        let base = hwhm_equivalent_sites_circle(q, &params.base()).unwrap();

        let distributed = &widths.eisf + &widths.qisf.sum_axis(Axis(2)).sum_axis(Axis(1));
        let reference = base.flatten().total_weight();
        for (a, b) in distributed.iter().zip(reference.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_quoted_parameters() {
        // q = [1, 2], N = 3, radius = 0.5, τ = 1.5, σ = 1
        let params = JumpSitesLogNormDist::new(3, 0.5, 1.5, 1.0);
        let widths = hwhm_jump_sites_log_norm_dist([1.0, 2.0], &params).unwrap();

        assert_relative_eq!(widths.hwhm[[0, 1, 10]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(widths.hwhm[[1, 2, 10]], 1.0, epsilon = 1e-12);
        assert_eq!(widths.hwhm[[0, 0, 3]], 0.0);
        assert_relative_eq!(widths.eisf[0], 0.9197364404381053, epsilon = 1e-12);
        assert_relative_eq!(widths.eisf[1], 0.713240066121676, epsilon = 1e-12);

        let qisf_total = widths.qisf.sum_axis(Axis(2)).sum_axis(Axis(1));
        assert_relative_eq!(qisf_total[0], 1.0 - 0.9197364404381053, epsilon = 1e-12);
        assert_relative_eq!(qisf_total[1], 1.0 - 0.713240066121676, epsilon = 1e-12);
    }

    #[test]
    fn test_sqw_two_q_values() {
        let params = JumpSitesLogNormDist::new(5, 1.0, 1.0, 1.0);
        let sqw =
            sqw_jump_sites_log_norm_dist([1.0, 2.0, 3.0], [0.3, 0.4], Profile::new(1.0, 0.0), &params)
                .unwrap();
        assert_eq!(sqw.shape(), &[2, 3]);

        let expected = [
            [0.00345997787784903, 0.001414797065211824, 0.0007700198118611145],
            [0.0060859653325113835, 0.0024912055805718747, 0.0013568572888977871],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (k, value) in row.iter().enumerate() {
                assert_relative_eq!(sqw.get(i, k).unwrap(), *value, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_sqw_single_q_is_flat() {
        let params = JumpSitesLogNormDist::new(4, 1.0, 1.0, 1.0);
        let sqw = sqw_jump_sites_log_norm_dist(1.0, 1.0, Profile::default(), &params).unwrap();
        assert_eq!(sqw.ndim(), 1);
        let flat = sqw.as_flat().unwrap();
        assert_eq!(flat.len(), 1);
        assert_relative_eq!(flat[0], 0.03436913663440426, max_relative = 1e-6);
    }

    #[test]
    fn test_elastic_line_on_grid() {
        let params = JumpSitesLogNormDist::default();
        let w = Array1::linspace(-1.0, 1.0, 201);
        let sqw = sqw_jump_sites_log_norm_dist(&w, 1.0, Profile::default(), &params).unwrap();
        let base = hwhm_equivalent_sites_circle(1.0, &params.base()).unwrap();
        let flat = sqw.as_flat().unwrap();

        // ω = 0 处的值 = EISF/Δω + 准弹性贡献
        let dw = w[1] - w[0];
        let quasi = flat[99];
        assert!(flat[100] > base.eisf[0] / dw);
        assert!(flat[100] - base.eisf[0] / dw > quasi);
    }

    #[test]
    fn test_very_wide_distribution_stays_finite() {
        // ratio 两端分别下溢为 0、上溢为 inf
        let params = JumpSitesLogNormDist::new(3, 1.0, 1.0, 400.0);
        let widths = hwhm_jump_sites_log_norm_dist(1.0, &params).unwrap();
        assert!(widths.hwhm.iter().all(|v| !v.is_nan()));
        assert!(widths.hwhm.slice(s![.., 0, ..]).iter().all(|v| *v == 0.0));

        let w = Array1::linspace(-1.0, 1.0, 11);
        let sqw = sqw_jump_sites_log_norm_dist(&w, 1.0, Profile::default(), &params).unwrap();
        assert!(sqw.rows().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_validation_boundaries() {
        let invalid = [
            JumpSitesLogNormDist::new(0, 1.0, 1.0, 1.0),
            JumpSitesLogNormDist::new(1, 1.0, 1.0, 1.0),
            JumpSitesLogNormDist::new(3, 0.0, 1.0, 1.0),
            JumpSitesLogNormDist::new(3, -1.0, 1.0, 1.0),
            JumpSitesLogNormDist::new(3, 1.0, -0.1, 1.0),
            JumpSitesLogNormDist::new(3, 1.0, 1.0, 0.0),
        ];
        for params in invalid {
            let err = hwhm_jump_sites_log_norm_dist(1.0, &params).unwrap_err();
            assert!(err.is_invalid_parameter(), "{:?}", params);
            assert!(sqw_jump_sites_log_norm_dist(0.0, 1.0, Profile::default(), &params).is_err());
        }

        let minimal = JumpSitesLogNormDist::new(2, 1.0, 1.0, 1.0);
        assert!(hwhm_jump_sites_log_norm_dist(1.0, &minimal).is_ok());
    }

    #[test]
    fn test_radius_checked_before_sites() {
        let params = JumpSitesLogNormDist::new(1, -1.0, 1.0, 1.0);
        let err = hwhm_jump_sites_log_norm_dist(1.0, &params).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_idempotent() {
        let params = JumpSitesLogNormDist::new(5, 1.1, 0.8, 0.6);
        let w = Array1::linspace(-3.0, 3.0, 61);
        let a = sqw_jump_sites_log_norm_dist(&w, [0.5, 1.5], Profile::new(2.0, 0.1), &params).unwrap();
        let b = sqw_jump_sites_log_norm_dist(&w, [0.5, 1.5], Profile::new(2.0, 0.1), &params).unwrap();
        assert_eq!(a, b);
    }
}
