//! # calc 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calc.rs`

use super::params::{ParameterArgs, StoreArgs};
use clap::Args;

/// calc 子命令参数
#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Do not record the (X_A, D_AB) pair in the result store
    #[arg(long, default_value_t = false)]
    pub no_store: bool,

    /// Print the individual terms of ln D_AB
    #[arg(long, default_value_t = false)]
    pub show_terms: bool,
}
