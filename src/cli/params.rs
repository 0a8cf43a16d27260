//! # 计算参数 CLI 定义
//!
//! 16 个计算参数的命令行选项，以及结果存储路径选项。
//! 被 `calc` 和 `sweep` 子命令通过 `#[command(flatten)]` 复用。
//!
//! ## 依赖关系
//! - 被 `cli/calc.rs`, `cli/sweep.rs`, `cli/results.rs` 使用
//! - 使用 `models/input.rs` 的 ParameterSet

use crate::models::ParameterSet;

use clap::Args;
use std::path::PathBuf;

/// 计算参数（文件 + 单项覆盖）
#[derive(Args, Debug, Default)]
pub struct ParameterArgs {
    /// Parameter file with 'key = value' lines (flags below override it)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Infinite-dilution diffusion coefficient D°_AB
    #[arg(long, allow_negative_numbers = true)]
    pub d_ab_initial: Option<f64>,

    /// Infinite-dilution diffusion coefficient D°_BA
    #[arg(long, allow_negative_numbers = true)]
    pub d_ba_initial: Option<f64>,

    /// Mole fraction of component A, strictly between 0 and 1
    #[arg(long, allow_negative_numbers = true)]
    pub fraction_a: Option<f64>,

    /// Size/volume parameter lambda_A (> 0)
    #[arg(long, allow_negative_numbers = true)]
    pub lambda_a: Option<f64>,

    /// Size/volume parameter lambda_B (> 0)
    #[arg(long, allow_negative_numbers = true)]
    pub lambda_b: Option<f64>,

    /// Surface-area parameter q_A
    #[arg(long, allow_negative_numbers = true)]
    pub q_a: Option<f64>,

    /// Surface-area parameter q_B
    #[arg(long, allow_negative_numbers = true)]
    pub q_b: Option<f64>,

    /// Area fraction theta_A
    #[arg(long, allow_negative_numbers = true)]
    pub theta_a: Option<f64>,

    /// Area fraction theta_B
    #[arg(long, allow_negative_numbers = true)]
    pub theta_b: Option<f64>,

    /// Area fraction theta_BA
    #[arg(long, allow_negative_numbers = true)]
    pub theta_ba: Option<f64>,

    /// Area fraction theta_AB
    #[arg(long, allow_negative_numbers = true)]
    pub theta_ab: Option<f64>,

    /// Area fraction theta_AA
    #[arg(long, allow_negative_numbers = true)]
    pub theta_aa: Option<f64>,

    /// Area fraction theta_BB
    #[arg(long, allow_negative_numbers = true)]
    pub theta_bb: Option<f64>,

    /// UNIFAC interaction parameter tau_AB (> 0)
    #[arg(long, allow_negative_numbers = true)]
    pub tau_ab: Option<f64>,

    /// UNIFAC interaction parameter tau_BA (> 0)
    #[arg(long, allow_negative_numbers = true)]
    pub tau_ba: Option<f64>,

    /// Experimental diffusion coefficient D_exp (non-zero)
    #[arg(long, allow_negative_numbers = true)]
    pub d_exp: Option<f64>,

    /// Reject any parameter that is not strictly positive
    #[arg(long, default_value_t = false)]
    pub require_positive: bool,
}

impl ParameterArgs {
    /// 命令行上显式给出的参数
    pub fn overrides(&self) -> ParameterSet {
        let flags = [
            ("D_AB_initial", self.d_ab_initial),
            ("D_BA_initial", self.d_ba_initial),
            ("fraction_A", self.fraction_a),
            ("coef_lambda_A", self.lambda_a),
            ("coef_lambda_B", self.lambda_b),
            ("q_A", self.q_a),
            ("q_B", self.q_b),
            ("theta_A", self.theta_a),
            ("theta_B", self.theta_b),
            ("theta_BA", self.theta_ba),
            ("theta_AB", self.theta_ab),
            ("theta_AA", self.theta_aa),
            ("theta_BB", self.theta_bb),
            ("tau_AB", self.tau_ab),
            ("tau_BA", self.tau_ba),
            ("D_exp", self.d_exp),
        ];

        let mut set = ParameterSet::new();
        for (name, value) in flags {
            if let Some(v) = value {
                set.set(name, v);
            }
        }
        set
    }
}

/// 结果存储位置
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// CSV file holding the recorded (X_A, D_AB) pairs
    #[arg(long, env = "UNIDIFF_STORE", default_value = "diffusion_results.csv")]
    pub store: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_contain_given_flags() {
        let args = ParameterArgs {
            fraction_a: Some(0.25),
            lambda_b: Some(1.1),
            ..ParameterArgs::default()
        };
        let set = args.overrides();

        assert_eq!(set.get("fraction_A"), Some(0.25));
        assert_eq!(set.get("coef_lambda_B"), Some(1.1));
        assert_eq!(set.missing().len(), 14);
    }
}
