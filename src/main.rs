//! # unidiff - UNIFAC 型关联式互扩散系数计算工具
//!
//! 由 16 个物性参数计算二元互扩散系数 D_AB，并与实验值比较。
//!
//! ## 子命令
//! - `calc`    - 单次计算并记录 (x_A, D_AB)
//! - `sweep`   - 在摩尔分数范围内扫描
//! - `batch`   - 批量计算 CSV 输入
//! - `results` - 结果存储管理
//!   - `show`  - 显示已存储结果
//!   - `plot`  - 绘制 D_AB - x_A 曲线
//!   - `reset` - 清空结果
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (参数文件 / 批量 CSV 解析)
//!   │     ├── diffusion/ (关联式计算、存储、绘图、导出)
//!   │     ├── batch/     (并行批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod diffusion;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
