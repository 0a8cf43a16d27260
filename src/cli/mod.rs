//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calc`: 单次计算
//! - `sweep`: 组成扫描
//! - `batch`: 批量 CSV 计算
//! - `results`: 结果存储管理（嵌套子命令）
//!   - `show`: 显示已存储结果
//!   - `plot`: 绘制 D_AB - x_A 曲线
//!   - `reset`: 清空结果
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: params, calc, sweep, batch, results

pub mod batch;
pub mod calc;
pub mod params;
pub mod results;
pub mod sweep;

use clap::{Parser, Subcommand};

/// unidiff - UNIFAC 型关联式互扩散系数计算
#[derive(Parser)]
#[command(name = "unidiff")]
#[command(version)]
#[command(
    about = "Binary mutual-diffusion coefficients from a UNIFAC-style correlation",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute D_AB and its deviation from the experimental value
    Calc(calc::CalcArgs),

    /// Evaluate D_AB over a range of mole fractions
    Sweep(sweep::SweepArgs),

    /// Compute every row of one or more input CSV files
    Batch(batch::BatchArgs),

    /// Inspect, plot or reset the stored (X_A, D_AB) results
    Results(results::ResultsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_values_accepted() {
        let cli = Cli::try_parse_from(["unidiff", "calc", "--tau-ba", "-5", "--no-store"]).unwrap();
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.params.tau_ba, Some(-5.0));
                assert!(args.no_store);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_results_subcommands_parse() {
        let cli = Cli::try_parse_from(["unidiff", "results", "plot", "-o", "curve.svg"]).unwrap();
        match cli.command {
            Commands::Results(args) => match args.command {
                results::ResultsCommands::Plot(plot) => {
                    assert_eq!(plot.output, std::path::PathBuf::from("curve.svg"));
                    assert_eq!(plot.width, 1000);
                }
                _ => panic!("expected plot"),
            },
            _ => panic!("expected results"),
        }
    }
}
