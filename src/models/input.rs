//! # 计算输入参数模型
//!
//! 二元互扩散系数关联式所需的 16 个物性参数（含实验参考值）。
//!
//! 序列化字段名沿用原始拼写（`D_AB_initial`, `fraction_A`, ...），
//! 同时接受全小写的 snake_case 写法。
//!
//! ## 依赖关系
//! - 被 `diffusion/calculator.rs` 使用
//! - 被 `parsers/params.rs`, `parsers/input_csv.rs` 构造

use crate::error::{Result, UnidiffError};

use serde::{Deserialize, Serialize};

/// 所有参数的原始字段名，顺序与 [`CalculationInput::values`] 一致
pub const FIELD_NAMES: [&str; 16] = [
    "D_AB_initial",
    "D_BA_initial",
    "fraction_A",
    "coef_lambda_A",
    "coef_lambda_B",
    "q_A",
    "q_B",
    "theta_A",
    "theta_B",
    "theta_BA",
    "theta_AB",
    "theta_AA",
    "theta_BB",
    "tau_AB",
    "tau_BA",
    "D_exp",
];

/// 单次计算的完整输入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// 无限稀释扩散系数 D°_AB
    #[serde(rename = "D_AB_initial", alias = "d_ab_initial")]
    pub d_ab_initial: f64,

    /// 无限稀释扩散系数 D°_BA
    #[serde(rename = "D_BA_initial", alias = "d_ba_initial")]
    pub d_ba_initial: f64,

    /// 组分 A 的摩尔分数 x_A，取值 (0, 1)
    #[serde(rename = "fraction_A", alias = "fraction_a")]
    pub fraction_a: f64,

    /// 体积参数 λ_A
    #[serde(rename = "coef_lambda_A", alias = "coef_lambda_a")]
    pub coef_lambda_a: f64,

    /// 体积参数 λ_B
    #[serde(rename = "coef_lambda_B", alias = "coef_lambda_b")]
    pub coef_lambda_b: f64,

    /// 表面积参数 q_A
    #[serde(rename = "q_A", alias = "q_a")]
    pub q_a: f64,

    /// 表面积参数 q_B
    #[serde(rename = "q_B", alias = "q_b")]
    pub q_b: f64,

    /// 面积分数 θ_A（不参与关联式）
    #[serde(rename = "theta_A", alias = "theta_a")]
    pub theta_a: f64,

    /// 面积分数 θ_B（不参与关联式）
    #[serde(rename = "theta_B", alias = "theta_b")]
    pub theta_b: f64,

    #[serde(rename = "theta_BA", alias = "theta_ba")]
    pub theta_ba: f64,

    #[serde(rename = "theta_AB", alias = "theta_ab")]
    pub theta_ab: f64,

    #[serde(rename = "theta_AA", alias = "theta_aa")]
    pub theta_aa: f64,

    #[serde(rename = "theta_BB", alias = "theta_bb")]
    pub theta_bb: f64,

    /// UNIFAC 相互作用参数 τ_AB
    #[serde(rename = "tau_AB", alias = "tau_ab")]
    pub tau_ab: f64,

    /// UNIFAC 相互作用参数 τ_BA
    #[serde(rename = "tau_BA", alias = "tau_ba")]
    pub tau_ba: f64,

    /// 实验参考扩散系数
    #[serde(rename = "D_exp", alias = "d_exp")]
    pub d_exp: f64,
}

impl CalculationInput {
    /// 按 [`FIELD_NAMES`] 顺序返回所有参数值
    pub fn values(&self) -> [f64; 16] {
        [
            self.d_ab_initial,
            self.d_ba_initial,
            self.fraction_a,
            self.coef_lambda_a,
            self.coef_lambda_b,
            self.q_a,
            self.q_b,
            self.theta_a,
            self.theta_b,
            self.theta_ba,
            self.theta_ab,
            self.theta_aa,
            self.theta_bb,
            self.tau_ab,
            self.tau_ba,
            self.d_exp,
        ]
    }

    /// 替换摩尔分数，其余参数不变（用于组成扫描）
    pub fn with_fraction_a(mut self, fraction_a: f64) -> Self {
        self.fraction_a = fraction_a;
        self
    }

    /// 要求所有参数严格为正
    ///
    /// 这是输入表单层面的约束，比关联式本身的前置条件更严格，
    /// 只在调用方显式要求时使用。
    pub fn ensure_all_positive(&self) -> Result<()> {
        for (name, value) in FIELD_NAMES.iter().zip(self.values()) {
            if value <= 0.0 {
                return Err(UnidiffError::invalid_input(format!(
                    "all values must be positive ({} = {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// 部分填充的参数集
///
/// 参数可以分别来自参数文件和命令行，最终合并为 [`CalculationInput`]。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: [Option<f64>; 16],
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查找字段索引，接受原始拼写或全小写
    pub fn field_index(key: &str) -> Option<usize> {
        FIELD_NAMES
            .iter()
            .position(|name| *name == key || name.to_lowercase() == key)
    }

    /// 设置参数值，未知字段名返回 `false`
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        match Self::field_index(key) {
            Some(idx) => {
                self.values[idx] = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        Self::field_index(key).and_then(|idx| self.values[idx])
    }

    /// 用另一参数集中已给出的值覆盖当前值
    pub fn merge(&mut self, other: &ParameterSet) {
        for (mine, theirs) in self.values.iter_mut().zip(other.values.iter()) {
            if theirs.is_some() {
                *mine = *theirs;
            }
        }
    }

    /// 尚未给出的字段名
    pub fn missing(&self) -> Vec<&'static str> {
        FIELD_NAMES
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    /// 合并为完整输入；缺少任何字段即报错
    pub fn into_input(self) -> Result<CalculationInput> {
        let v = self.values;
        let field = |idx: usize| -> Result<f64> {
            v[idx].ok_or_else(|| UnidiffError::MissingParameter(FIELD_NAMES[idx].to_string()))
        };

        Ok(CalculationInput {
            d_ab_initial: field(0)?,
            d_ba_initial: field(1)?,
            fraction_a: field(2)?,
            coef_lambda_a: field(3)?,
            coef_lambda_b: field(4)?,
            q_a: field(5)?,
            q_b: field(6)?,
            theta_a: field(7)?,
            theta_b: field(8)?,
            theta_ba: field(9)?,
            theta_ab: field(10)?,
            theta_aa: field(11)?,
            theta_bb: field(12)?,
            tau_ab: field(13)?,
            tau_ba: field(14)?,
            d_exp: field(15)?,
        })
    }
}
