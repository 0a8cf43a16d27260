//! # 数据模型模块
//!
//! 定义计算输入参数和结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `diffusion/`, `parsers/` 和 `commands/` 使用
//! - 子模块: input, result

pub mod input;
pub mod result;

pub use input::{CalculationInput, ParameterSet, FIELD_NAMES};
pub use result::{CurvePoint, DiffusionResult};
