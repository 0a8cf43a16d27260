//! # batch 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input: CSV file or directory containing CSV files
    pub input: PathBuf,

    /// Output directory for '<stem>_diffusion.csv' files
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Glob pattern for input files (directory mode, e.g., "*.csv,*.txt")
    #[arg(long, default_value = "*.csv")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, directory mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (directory mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
