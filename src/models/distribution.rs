//! # 对数正态速率分布离散化
//!
//! 用 2·n_max+1 个对数等间距采样点近似弛豫速率倍数的对数正态分布。
//!
//! ## 算法
//! 1. range = σ·√(−2·ln(low_lim))：对数空间中幅度降到峰值 low_lim 倍的半宽
//! 2. dγ = range / n_max
//! 3. ratioᵢ = exp(i·dγ − range), i = 0..=2·n_max，中心点 ratio = 1
//! 4. gᵢ = exp(−½·ln²(ratioᵢ)/σ²)
//! 5. 归一化使 Σgᵢ = 1
//!
//! 采样点数与 σ 无关（默认 21），分布尾部 low_lim 以下被截断。
//!
//! ## 依赖关系
//! - 被 `models/lognorm.rs` 调用

use crate::error::{ensure_positive, Result};

use ndarray::Array1;

/// 采样半数
const N_MAX: usize = 10;

/// 相对幅度截断
const LOW_LIM: f64 = 0.1;

/// 采样点数 K = 2·n_max + 1
pub const SAMPLE_COUNT: usize = 2 * N_MAX + 1;

/// 离散化后的速率分布
#[derive(Debug, Clone, PartialEq)]
pub struct RateDistribution {
    /// 速率相对于平均速率的倍数 (K,)
    pub ratio: Array1<f64>,
    /// 归一化权重 (K,)
    pub weight: Array1<f64>,
}

impl RateDistribution {
    pub fn len(&self) -> usize {
        self.ratio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratio.is_empty()
    }

    /// ratio = 1 的中心采样点下标
    pub fn central_index(&self) -> usize {
        self.len() / 2
    }
}

/// 离散化标准差为 σ 的对数正态分布
pub fn log_normal_rates(sigma: f64) -> Result<RateDistribution> {
    ensure_positive("sigma", sigma, "standard deviation of the distribution")?;
    Ok(sample(sigma, N_MAX, LOW_LIM))
}

fn sample(sigma: f64, n_max: usize, low_lim: f64) -> RateDistribution {
    let range_gamma = sigma * (-2.0 * low_lim.ln()).sqrt();
    let dgamma = range_gamma / n_max as f64;

    let ratio = Array1::from_shape_fn(2 * n_max + 1, |i| (i as f64 * dgamma - range_gamma).exp());

    let mut weight = ratio.mapv(|r| (-0.5 * r.ln().powi(2) / (sigma * sigma)).exp());
    let total = weight.sum();
    weight /= total;

    RateDistribution { ratio, weight }
}
