//! # results 子命令 CLI 定义
//!
//! 结果存储管理，包含多个子命令：
//! - `show`: 表格显示
//! - `plot`: 曲线绘制
//! - `reset`: 清空
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/results.rs`

use super::params::StoreArgs;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// results 主命令参数
#[derive(Args, Debug)]
pub struct ResultsArgs {
    #[command(subcommand)]
    pub command: ResultsCommands,
}

/// results 子命令
#[derive(Subcommand, Debug)]
pub enum ResultsCommands {
    /// Print the stored (X_A, D_AB) pairs
    Show(StoreArgs),

    /// Plot D_AB against X_A from the stored results
    Plot(PlotArgs),

    /// Remove all stored results (keeps the CSV header)
    Reset(StoreArgs),
}

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlotFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Output image path
    #[arg(short, long, default_value = "diffusion_curve.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<PlotFormat>,

    /// Draw a horizontal reference line at this experimental value
    #[arg(long, allow_negative_numbers = true)]
    pub d_exp: Option<f64>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 750)]
    pub height: u32,

    /// Title for the plot
    #[arg(long, default_value = "D_AB vs X_A")]
    pub title: String,
}
