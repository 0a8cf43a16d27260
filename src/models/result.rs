//! # 计算结果数据模型
//!
//! ## 依赖关系
//! - 被 `diffusion/calculator.rs` 产生
//! - 被 `diffusion/store.rs`, `diffusion/plot.rs` 和 `commands/` 使用

use serde::{Deserialize, Serialize};

/// 单次计算结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionResult {
    /// 预测的互扩散系数 D_AB
    pub d_ab: f64,
    /// 相对实验值的百分比误差
    pub relative_error_percent: f64,
}

/// 结果存储中的一行：x_A 与对应的 D_AB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    #[serde(rename = "X_A")]
    pub x_a: f64,
    #[serde(rename = "D_AB")]
    pub d_ab: f64,
}

impl CurvePoint {
    pub fn new(x_a: f64, d_ab: f64) -> Self {
        Self { x_a, d_ab }
    }
}
