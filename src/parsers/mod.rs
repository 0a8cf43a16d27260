//! # 解析器模块
//!
//! 提供计算参数的输入格式解析。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: params, input_csv

pub mod input_csv;
pub mod params;

pub use input_csv::parse_input_csv;
pub use params::parse_params_file;
