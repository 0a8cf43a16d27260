//! # 扩散系数计算模块
//!
//! 提供 UNIFAC 型关联式的互扩散系数计算、结果存储与曲线绘制。
//!
//! ## 子模块
//! - `calculator`: 关联式计算（纯函数）
//! - `store`: (x_A, D_AB) 结果 CSV 存储
//! - `plot`: 曲线图生成
//! - `export`: 扫描/批量结果导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 数据模型

pub mod calculator;
pub mod export;
pub mod plot;
pub mod store;

pub use calculator::{compute, CorrelationTerms};
pub use store::{RecordOutcome, ResultStore};
