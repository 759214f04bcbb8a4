//! # 特殊函数
//!
//! 实数自变量的球 Bessel 函数 jₗ(x)，供各向同性转动扩散和位点跳跃模型使用。
//!
//! ## 算法
//! - x < 1 或 l > x：幂级数
//!   jₗ(x) = xˡ/(2l+1)!! · Σₖ (−x²/2)ᵏ / (k! · Πᵢ₌₁..ₖ (2l+2i+1))
//! - 其余：由 j₀、j₁ 的闭式出发向上递推
//!   jₗ₊₁ = (2l+1)/x · jₗ − jₗ₋₁（l ≤ x 时稳定）
//!
//! ## 依赖关系
//! - 被 `models/circle.rs`, `models/rotation.rs`, `models/diffusion.rs` 调用
//! - 无外部依赖

const SERIES_CUTOFF: f64 = 1.0;
const SERIES_MAX_ITER: usize = 200;
const SERIES_REL_TOL: f64 = 1.0e-17;

/// j₀(x) = sin(x)/x，x = 0 时取 1
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x.sin() / x
    }
}

/// 球 Bessel 函数 jₗ(x)
pub fn spherical_jn(order: usize, x: f64) -> f64 {
    // jₗ(−x) = (−1)ˡ jₗ(x)
    if x < 0.0 {
        let value = spherical_jn(order, -x);
        return if order % 2 == 1 { -value } else { value };
    }
    if x < SERIES_CUTOFF || order as f64 > x {
        return series(order, x);
    }

    let j0 = x.sin() / x;
    if order == 0 {
        return j0;
    }

    let j1 = x.sin() / (x * x) - x.cos() / x;
    let (mut prev, mut curr) = (j0, j1);
    for l in 1..order {
        let next = (2 * l + 1) as f64 / x * curr - prev;
        prev = curr;
        curr = next;
    }
    curr
}

fn series(order: usize, x: f64) -> f64 {
    // (2l+1)!!
    let double_factorial: f64 = (1..=2 * order + 1).step_by(2).map(|i| i as f64).product();

    let half_x_sq = 0.5 * x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..=SERIES_MAX_ITER {
        term *= -half_x_sq / (k * (2 * order + 2 * k + 1)) as f64;
        sum += term;
        if term.abs() < SERIES_REL_TOL * sum.abs() {
            break;
        }
    }

    x.powi(order as i32) / double_factorial * sum
}
