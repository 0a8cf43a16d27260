//! # 参数文件解析器
//!
//! 解析 `key = value` 形式的计算参数文件。
//!
//! ## 格式说明
//! ```text
//! # 乙醇-水体系
//! D_AB_initial = 1.0e-5
//! D_BA_initial : 1.2e-5
//! fraction_A   = 0.5     ! 行尾注释
//! ...
//! ```
//! - `#` 或 `!` 开始注释
//! - 分隔符可为 `=` 或 `:`
//! - 字段名为原始拼写或全小写
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs`, `commands/sweep.rs` 使用
//! - 使用 `models/input.rs` 的 ParameterSet

use crate::error::{Result, UnidiffError};
use crate::models::ParameterSet;

use regex::Regex;
use std::fs;
use std::path::Path;

/// 解析参数文件
pub fn parse_params_file(path: &Path) -> Result<ParameterSet> {
    let content = fs::read_to_string(path).map_err(|e| UnidiffError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_params_content(&content, &path.display().to_string())
}

/// 从字符串内容解析参数
pub fn parse_params_content(content: &str, source_name: &str) -> Result<ParameterSet> {
    let line_re = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*[=:]\s*(\S+)$").unwrap();

    let parse_error = |line_no: usize, reason: String| UnidiffError::ParseError {
        format: "parameter".to_string(),
        path: source_name.to_string(),
        reason: format!("line {}: {}", line_no, reason),
    };

    let mut params = ParameterSet::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let caps = line_re
            .captures(line)
            .ok_or_else(|| parse_error(line_no, format!("expected 'key = value', got '{}'", line)))?;

        let key = &caps[1];
        let value: f64 = caps[2]
            .parse()
            .map_err(|_| parse_error(line_no, format!("'{}' is not a number", &caps[2])))?;

        if !params.set(key, value) {
            return Err(parse_error(line_no, format!("unknown parameter '{}'", key)));
        }
    }

    Ok(params)
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', '!']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}
