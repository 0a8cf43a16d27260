//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `diffusion/`, `utils/`
//! - 子模块: calc, sweep, batch, results

pub mod batch;
pub mod calc;
pub mod results;
pub mod sweep;

use crate::cli::params::ParameterArgs;
use crate::cli::Commands;
use crate::error::Result;
use crate::models::{CalculationInput, ParameterSet};
use crate::parsers;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Calc(args) => calc::execute(args),
        Commands::Sweep(args) => sweep::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Results(args) => results::execute(args),
    }
}

/// 合并参数文件与命令行参数
fn resolve_parameters(args: &ParameterArgs) -> Result<ParameterSet> {
    let mut params = match &args.params {
        Some(path) => parsers::parse_params_file(path)?,
        None => ParameterSet::new(),
    };
    params.merge(&args.overrides());
    Ok(params)
}

/// 得到完整输入，并按需检查所有参数为正
fn resolve_input(args: &ParameterArgs) -> Result<CalculationInput> {
    let input = resolve_parameters(args)?.into_input()?;
    if args.require_positive {
        input.ensure_all_positive()?;
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const REFERENCE_PARAMS: &str = "\
D_AB_initial = 1e-5
D_BA_initial = 1.2e-5
fraction_A = 0.5
coef_lambda_A = 1.0
coef_lambda_B = 1.1
q_A = 0.9
q_B = 1.0
theta_A = 0.5
theta_B = 0.5
theta_BA = 0.4
theta_AB = 0.6
theta_AA = 0.5
theta_BB = 0.5
tau_AB = 1.2
tau_BA = 0.9
D_exp = 1.1e-5
";

    #[test]
    fn test_flags_override_parameter_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.params");
        fs::write(&path, REFERENCE_PARAMS).unwrap();

        let args = ParameterArgs {
            params: Some(path),
            fraction_a: Some(0.3),
            ..ParameterArgs::default()
        };
        let input = resolve_input(&args).unwrap();
        assert_eq!(input.fraction_a, 0.3);
        assert_eq!(input.tau_ba, 0.9);
    }

    #[test]
    fn test_missing_parameter_without_file() {
        let args = ParameterArgs {
            fraction_a: Some(0.3),
            ..ParameterArgs::default()
        };
        assert!(resolve_input(&args).is_err());
    }

    #[test]
    fn test_require_positive_rejects_negative_theta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.params");
        fs::write(&path, REFERENCE_PARAMS).unwrap();

        let mut args = ParameterArgs {
            params: Some(path),
            theta_aa: Some(-0.1),
            ..ParameterArgs::default()
        };
        assert!(resolve_input(&args).is_ok());

        args.require_positive = true;
        let err = resolve_input(&args).unwrap_err();
        assert!(err.to_string().contains("theta_AA"));
    }
}
