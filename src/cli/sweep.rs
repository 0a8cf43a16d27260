//! # sweep 子命令 CLI 定义
//!
//! 固定其余参数，在给定摩尔分数范围内扫描 D_AB。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sweep.rs`

use super::params::{ParameterArgs, StoreArgs};
use clap::Args;
use std::path::PathBuf;

/// sweep 子命令参数
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// Mole fraction range of A (e.g., "0.05-0.95"), both ends inside (0, 1)
    #[arg(short, long, default_value = "0.05-0.95")]
    pub range: String,

    /// Step between consecutive mole fractions
    #[arg(long, default_value_t = 0.05)]
    pub step: f64,

    /// Output CSV file (X_A, D_AB, relative_error_percent)
    #[arg(short, long, default_value = "diffusion_sweep.csv")]
    pub output: PathBuf,

    /// Also render the curve to this file (PNG or SVG by extension)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Record every swept point in the result store
    #[arg(long, default_value_t = false)]
    pub record: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}
