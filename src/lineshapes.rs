//! # 基本线形
//!
//! 在能量转移网格上计算单位面积线形（乘以 scale）。
//!
//! ## 公式
//! - Lorentzian: L(ω) = scale·Γ / (π((ω−ω₀)² + Γ²))，Γ 为半高半宽 (HWHM)
//! - Gaussian:   G(ω) = scale·exp(−(ω−ω₀)²/(2σ²)) / (σ√(2π))
//! - Delta:      网格上最靠近 ω₀ 的点取 scale/Δω，其余为 0
//!
//! 宽度为 0（或 Γ² 下溢为 0）的 Lorentzian 一律退化为 delta，避免除零；
//! 宽度为无穷大（驻留时间为 0）时贡献为 0。
//!
//! ## 依赖关系
//! - 被 `spectrum.rs` 调用
//! - 使用 `ndarray`

use ndarray::{Array1, ArrayViewMut1, Zip};
use std::f64::consts::PI;

/// Lorentzian 线形
pub fn lorentzian(w: &Array1<f64>, scale: f64, center: f64, hwhm: f64) -> Array1<f64> {
    let mut out = Array1::zeros(w.len());
    add_lorentzian(out.view_mut(), w, scale, center, hwhm);
    out
}

/// 将 scale 倍的 Lorentzian 累加到 `out`
pub fn add_lorentzian(
    mut out: ArrayViewMut1<'_, f64>,
    w: &Array1<f64>,
    scale: f64,
    center: f64,
    hwhm: f64,
) {
    if hwhm == 0.0 {
        add_delta(out, w, scale, center);
        return;
    }
    if hwhm.is_infinite() || scale == 0.0 {
        return;
    }

    let hwhm = hwhm.abs();
    let hwhm_sq = hwhm * hwhm;
    // Γ² 下溢为 0 时按 delta 处理
    if hwhm_sq == 0.0 {
        add_delta(out, w, scale, center);
        return;
    }
    let amplitude = scale * hwhm / PI;
    Zip::from(&mut out).and(w).for_each(|o, &x| {
        let dx = x - center;
        *o += amplitude / (dx * dx + hwhm_sq);
    });
}

/// Delta 线形（网格上的窄脉冲）
pub fn delta(w: &Array1<f64>, scale: f64, center: f64) -> Array1<f64> {
    let mut out = Array1::zeros(w.len());
    add_delta(out.view_mut(), w, scale, center);
    out
}

/// 将 scale 倍的 delta 累加到 `out`
pub fn add_delta(mut out: ArrayViewMut1<'_, f64>, w: &Array1<f64>, scale: f64, center: f64) {
    if let Some(idx) = nearest_bin(w, center) {
        out[idx] += scale / grid_spacing(w);
    }
}

/// Gaussian 线形
pub fn gaussian(w: &Array1<f64>, scale: f64, center: f64, sigma: f64) -> Array1<f64> {
    if sigma <= 0.0 {
        return delta(w, scale, center);
    }

    let norm = scale / (sigma * (2.0 * PI).sqrt());
    let two_sigma_sq = 2.0 * sigma * sigma;
    w.mapv(|x| {
        let dx = x - center;
        norm * (-dx * dx / two_sigma_sq).exp()
    })
}

/// 网格范围内距 center 最近的点；center 在范围外时返回 None
fn nearest_bin(w: &Array1<f64>, center: f64) -> Option<usize> {
    let (min, max) = bounds(w)?;
    if center < min || center > max {
        return None;
    }

    w.iter()
        .enumerate()
        .map(|(i, x)| (i, (x - center).abs()))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// 平均网格间距；单点网格取 1
fn grid_spacing(w: &Array1<f64>) -> f64 {
    match bounds(w) {
        Some((min, max)) if w.len() > 1 && max > min => (max - min) / (w.len() - 1) as f64,
        _ => 1.0,
    }
}

fn bounds(w: &Array1<f64>) -> Option<(f64, f64)> {
    if w.is_empty() {
        return None;
    }
    let min = w.iter().copied().fold(f64::INFINITY, f64::min);
    let max = w.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn uniform(min: f64, max: f64, n: usize) -> Array1<f64> {
        Array1::linspace(min, max, n)
    }

    #[test]
    fn test_lorentzian_peak_value() {
        let w = array![0.0, 1.0];
        let l = lorentzian(&w, 2.0, 0.0, 0.5);
        // 峰值 scale/(πΓ)
        assert_relative_eq!(l[0], 2.0 / (PI * 0.5), epsilon = 1e-12);
        // 半高处
        let l = lorentzian(&array![0.5], 1.0, 0.0, 0.5);
        assert_relative_eq!(l[0], 0.5 / (PI * 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_lorentzian_area() {
        let w = uniform(-2000.0, 2000.0, 400_001);
        let dw = w[1] - w[0];
        let area: f64 = lorentzian(&w, 3.0, 0.2, 1.0).sum() * dw;
        assert!((area - 3.0).abs() < 2e-3, "area = {}", area);
    }

    #[test]
    fn test_zero_width_lorentzian_is_delta() {
        let w = uniform(-1.0, 1.0, 21);
        let l = lorentzian(&w, 1.0, 0.0, 0.0);
        assert_eq!(l, delta(&w, 1.0, 0.0));
        assert!(l.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_underflowing_width_is_delta() {
        let w = uniform(-1.0, 1.0, 11);
        let l = lorentzian(&w, 1.0, 0.0, 1e-200);
        assert_eq!(l, delta(&w, 1.0, 0.0));
        assert!(l.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_infinite_width_contributes_nothing() {
        let w = uniform(-1.0, 1.0, 5);
        let l = lorentzian(&w, 1.0, 0.0, f64::INFINITY);
        assert!(l.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_delta_integrates_to_scale() {
        let w = uniform(-1.0, 1.0, 41);
        let d = delta(&w, 2.5, 0.12);
        let dw = w[1] - w[0];
        assert_relative_eq!(d.sum() * dw, 2.5, epsilon = 1e-12);
        // 只在最近的点非零: 0.1
        assert_eq!(d.iter().filter(|v| **v != 0.0).count(), 1);
        assert!(d[22] > 0.0);
    }

    #[test]
    fn test_delta_outside_grid_is_zero() {
        let w = array![1.0, 2.0, 3.0];
        assert!(delta(&w, 1.0, 0.0).iter().all(|v| *v == 0.0));
        let single = delta(&array![0.0], 1.0, 0.0);
        assert_eq!(single[0], 1.0);
    }

    #[test]
    fn test_gaussian_normalized() {
        let w = uniform(-10.0, 10.0, 2001);
        let dw = w[1] - w[0];
        let g = gaussian(&w, 1.5, 1.0, 0.7);
        assert_relative_eq!(g.sum() * dw, 1.5, epsilon = 1e-6);
        assert_eq!(gaussian(&w, 1.0, 0.0, 0.0), delta(&w, 1.0, 0.0));
    }
}
