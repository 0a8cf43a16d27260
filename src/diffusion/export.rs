//! # 结果数据导出
//!
//! 导出组成扫描和批量计算结果到 CSV。
//!
//! ## 支持格式
//! - 扫描: `X_A, D_AB, relative_error_percent`
//! - 批量: `label, X_A, D_AB, relative_error_percent, error`，失败行只填 error 列
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `commands/batch.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, UnidiffError};
use crate::models::DiffusionResult;

use serde::Serialize;
use std::path::Path;

/// 批量计算的一行输出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub label: String,
    /// 输入行无法解析出摩尔分数时为空
    #[serde(rename = "X_A")]
    pub x_a: Option<f64>,
    #[serde(rename = "D_AB")]
    pub d_ab: Option<f64>,
    pub relative_error_percent: Option<f64>,
    pub error: String,
}

impl BatchRecord {
    pub fn from_outcome(label: String, x_a: Option<f64>, outcome: Result<DiffusionResult>) -> Self {
        match outcome {
            Ok(r) => Self {
                label,
                x_a,
                d_ab: Some(r.d_ab),
                relative_error_percent: Some(r.relative_error_percent),
                error: String::new(),
            },
            Err(e) => Self {
                label,
                x_a,
                d_ab: None,
                relative_error_percent: None,
                error: e.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }
}

/// 导出组成扫描结果
pub fn sweep_to_csv(points: &[(f64, DiffusionResult)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["X_A", "D_AB", "relative_error_percent"])?;

    for (x_a, result) in points {
        wtr.write_record(&[
            format!("{:.6}", x_a),
            format!("{:.10e}", result.d_ab),
            format!("{:.6}", result.relative_error_percent),
        ])?;
    }

    wtr.flush().map_err(|e| UnidiffError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出批量计算结果
pub fn batch_to_csv(records: &[BatchRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    // serde 只在首行写表头，空结果也保留表头
    if records.is_empty() {
        wtr.write_record(["label", "X_A", "D_AB", "relative_error_percent", "error"])?;
    }

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(|e| UnidiffError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
