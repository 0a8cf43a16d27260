//! # 扩散系数计算器
//!
//! 基于 UNIFAC 型活度系数模型的二元互扩散系数关联式。
//!
//! ## 算法概述
//! 1. 校验前置条件（摩尔分数、体积参数、相互作用参数、实验值）
//! 2. 计算体积分数 φ_A, φ_B
//! 3. 累加四个对数项得到 ln D_AB
//! 4. 取指数并与实验值比较
//!
//! 计算是纯函数：无状态、无 I/O，可在任意线程并发调用。
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs`, `commands/sweep.rs`, `commands/batch.rs` 调用
//! - 使用 `models/input.rs` 的 CalculationInput

use crate::error::{Result, UnidiffError};
use crate::models::{CalculationInput, DiffusionResult};

/// 关联式中 ln D_AB 的各项分解
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationTerms {
    /// 体积分数 φ_A
    pub phi_a: f64,
    /// 体积分数 φ_B
    pub phi_b: f64,
    /// 无限稀释项 + 组合熵项
    pub term1: f64,
    /// 体积比修正项
    pub term2: f64,
    /// A 侧残基相互作用项
    pub term3: f64,
    /// B 侧残基相互作用项
    pub term4: f64,
}

impl CorrelationTerms {
    /// 计算各项（不做前置条件校验）
    pub fn evaluate(input: &CalculationInput) -> Self {
        let x_a = input.fraction_a;
        let x_b = 1.0 - x_a;
        let lambda_a = input.coef_lambda_a;
        let lambda_b = input.coef_lambda_b;

        let denom = x_a * lambda_a + x_b * lambda_b;
        let phi_a = x_a * lambda_a / denom;
        let phi_b = x_b * lambda_b / denom;

        let term1 = x_b * input.d_ab_initial.ln()
            + x_a * input.d_ba_initial.ln()
            + 2.0 * (x_a * (x_a / phi_a).ln() + x_b * (x_b / phi_b).ln());

        let term2 = 2.0
            * x_a
            * x_b
            * ((phi_a / x_a) * (1.0 - lambda_a / lambda_b)
                + (phi_b / x_b) * (1.0 - lambda_b / lambda_a));

        // 第二个求和项分别乘以 τ_AB / τ_BA，按原关联式保留
        let term3 = x_b
            * input.q_a
            * ((1.0 - input.theta_ba.powi(2)) * input.tau_ba.ln()
                + (1.0 - input.theta_bb.powi(2)) * input.tau_ab * input.tau_ab.ln());

        let term4 = x_a
            * input.q_b
            * ((1.0 - input.theta_ab.powi(2)) * input.tau_ab.ln()
                + (1.0 - input.theta_aa.powi(2)) * input.tau_ba * input.tau_ba.ln());

        Self {
            phi_a,
            phi_b,
            term1,
            term2,
            term3,
            term4,
        }
    }

    /// ln D_AB
    pub fn ln_d_ab(&self) -> f64 {
        self.term1 + self.term2 + self.term3 + self.term4
    }
}

/// 校验前置条件，第一个违反项即返回错误
pub fn validate(input: &CalculationInput) -> Result<()> {
    if input.fraction_a <= 0.0 || input.fraction_a >= 1.0 {
        return Err(UnidiffError::invalid_input(format!(
            "mole fraction of A must lie strictly between 0 and 1 (fraction_A = {})",
            input.fraction_a
        )));
    }

    if input.coef_lambda_a <= 0.0 || input.coef_lambda_b <= 0.0 {
        return Err(UnidiffError::invalid_input(format!(
            "lambda coefficients must be strictly positive (coef_lambda_A = {}, coef_lambda_B = {})",
            input.coef_lambda_a, input.coef_lambda_b
        )));
    }

    if input.tau_ab <= 0.0 || input.tau_ba <= 0.0 {
        return Err(UnidiffError::invalid_input(format!(
            "tau values must be strictly positive (tau_AB = {}, tau_BA = {})",
            input.tau_ab, input.tau_ba
        )));
    }

    if input.d_exp == 0.0 {
        return Err(UnidiffError::invalid_input(
            "experimental diffusion coefficient D_exp must be non-zero",
        ));
    }

    Ok(())
}

/// 计算扩散系数及其相对实验值的百分比误差
pub fn compute(input: &CalculationInput) -> Result<DiffusionResult> {
    validate(input)?;

    let terms = CorrelationTerms::evaluate(input);
    let d_ab = terms.ln_d_ab().exp();
    ensure_finite("D_AB", d_ab)?;

    let relative_error_percent = (d_ab - input.d_exp).abs() / input.d_exp * 100.0;
    ensure_finite("relative_error_percent", relative_error_percent)?;

    Ok(DiffusionResult {
        d_ab,
        relative_error_percent,
    })
}

fn ensure_finite(quantity: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(UnidiffError::NotANumber {
            quantity: quantity.to_string(),
            value,
        })
    }
}
