//! # 输入网格与输出形状
//!
//! q、ω 输入统一转换为一维 `Array1<f64>`；S(q, ω) 输出按 q 的个数决定形状。
//!
//! ## 形状约定
//! - 多个 q：`Sqw::Grid`，形状 (M, W)
//! - 单个 q：`Sqw::Flat`，形状 (W,)，便于拟合程序逐条曲线使用
//!
//! ## 依赖关系
//! - 被 `spectrum.rs` 和 `models/` 使用
//! - 使用 `ndarray`

use crate::error::{QensError, Result};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// 一维数值网格（标量、切片、Vec、ndarray 均可转换）
#[derive(Debug, Clone, PartialEq)]
pub struct Grid(Array1<f64>);

impl Grid {
    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<f64> for Grid {
    fn from(value: f64) -> Self {
        Grid(Array1::from_elem(1, value))
    }
}

impl From<Vec<f64>> for Grid {
    fn from(values: Vec<f64>) -> Self {
        Grid(Array1::from_vec(values))
    }
}

impl From<&Vec<f64>> for Grid {
    fn from(values: &Vec<f64>) -> Self {
        Grid(Array1::from_vec(values.clone()))
    }
}

impl From<&[f64]> for Grid {
    fn from(values: &[f64]) -> Self {
        Grid(Array1::from_vec(values.to_vec()))
    }
}

impl<const N: usize> From<[f64; N]> for Grid {
    fn from(values: [f64; N]) -> Self {
        Grid(Array1::from_vec(values.to_vec()))
    }
}

impl<const N: usize> From<&[f64; N]> for Grid {
    fn from(values: &[f64; N]) -> Self {
        Grid(Array1::from_vec(values.to_vec()))
    }
}

impl From<Array1<f64>> for Grid {
    fn from(values: Array1<f64>) -> Self {
        Grid(values)
    }
}

impl From<&Array1<f64>> for Grid {
    fn from(values: &Array1<f64>) -> Self {
        Grid(values.clone())
    }
}

impl From<ArrayView1<'_, f64>> for Grid {
    fn from(values: ArrayView1<'_, f64>) -> Self {
        Grid(values.to_owned())
    }
}

/// 转换并检查动量转移 q：非空、有限、非负
pub fn momentum_transfer(q: impl Into<Grid>) -> Result<Array1<f64>> {
    let q = q.into().into_inner();
    if q.is_empty() {
        return Err(QensError::ShapeMismatch(
            "q must contain at least one value".to_string(),
        ));
    }
    if let Some(bad) = q.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
        return Err(QensError::invalid(
            "q",
            format!("momentum transfer should be finite and positive or zero (got {})", bad),
        ));
    }
    Ok(q)
}

/// S(q, ω) 计算结果
#[derive(Debug, Clone, PartialEq)]
pub enum Sqw {
    /// 单个 q：展平为 (W,)
    Flat(Array1<f64>),
    /// 多个 q：(M, W)
    Grid(Array2<f64>),
}

impl Sqw {
    /// 按 q 的个数应用形状约定
    pub fn from_rows(rows: Array2<f64>) -> Self {
        if rows.nrows() == 1 {
            Sqw::Flat(rows.index_axis_move(Axis(0), 0))
        } else {
            Sqw::Grid(rows)
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Sqw::Flat(_) => 1,
            Sqw::Grid(_) => 2,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Sqw::Flat(a) => a.shape(),
            Sqw::Grid(a) => a.shape(),
        }
    }

    /// q 的个数
    pub fn n_q(&self) -> usize {
        match self {
            Sqw::Flat(_) => 1,
            Sqw::Grid(a) => a.nrows(),
        }
    }

    /// 按 (q, ω) 下标取值
    pub fn get(&self, iq: usize, iw: usize) -> Option<f64> {
        match self {
            Sqw::Flat(a) if iq == 0 => a.get(iw).copied(),
            Sqw::Flat(_) => None,
            Sqw::Grid(a) => a.get((iq, iw)).copied(),
        }
    }

    pub fn as_flat(&self) -> Option<&Array1<f64>> {
        match self {
            Sqw::Flat(a) => Some(a),
            Sqw::Grid(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Array2<f64>> {
        match self {
            Sqw::Flat(_) => None,
            Sqw::Grid(a) => Some(a),
        }
    }

    /// 统一按 (M, W) 视图访问
    pub fn rows(&self) -> ArrayView2<'_, f64> {
        match self {
            Sqw::Flat(a) => a.view().insert_axis(Axis(0)),
            Sqw::Grid(a) => a.view(),
        }
    }

    pub fn into_rows(self) -> Array2<f64> {
        match self {
            Sqw::Flat(a) => a.insert_axis(Axis(0)),
            Sqw::Grid(a) => a,
        }
    }
}
