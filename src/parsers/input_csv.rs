//! # 批量输入 CSV 解析器
//!
//! 每行一组计算参数，表头为 16 个字段名（顺序任意），可选 `label` 列。
//!
//! 表头错误（未知列、缺列）和 CSV 结构错误使整个文件失败；
//! 单元格不是数字只使该行失败，错误随行返回。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `csv` 读取，经 `models/input.rs` 的 ParameterSet 组装

use crate::error::{Result, UnidiffError};
use crate::models::{CalculationInput, ParameterSet, FIELD_NAMES};

use std::fs::File;
use std::path::Path;

/// 批量输入的一行
#[derive(Debug)]
pub struct InputRow {
    pub label: Option<String>,
    /// 该行可解析出的摩尔分数
    pub fraction_a: Option<f64>,
    pub input: Result<CalculationInput>,
}

impl InputRow {
    /// 行标签，缺省时使用行号
    pub fn label_or(&self, row_no: usize) -> String {
        self.label
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| format!("row{}", row_no))
    }
}

/// 读取批量输入文件
pub fn parse_input_csv(path: &Path) -> Result<Vec<InputRow>> {
    if !path.is_file() {
        return Err(UnidiffError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|e| UnidiffError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_input_reader(file, &path.display().to_string())
}

/// 从任意 reader 读取
pub fn parse_input_reader<R: std::io::Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<InputRow>> {
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_rows(rdr, source_name)
}

fn read_rows<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
    source_name: &str,
) -> Result<Vec<InputRow>> {
    let parse_error = |reason: String| UnidiffError::ParseError {
        format: "batch CSV".to_string(),
        path: source_name.to_string(),
        reason,
    };

    let headers = rdr.headers()?.clone();
    let mut present = [false; FIELD_NAMES.len()];
    for name in headers.iter() {
        if name == "label" {
            continue;
        }
        match ParameterSet::field_index(name) {
            Some(idx) => present[idx] = true,
            None => return Err(parse_error(format!("unknown column '{}'", name))),
        }
    }

    let missing: Vec<&str> = FIELD_NAMES
        .iter()
        .zip(present)
        .filter(|(_, found)| !found)
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(parse_error(format!(
            "missing column(s) {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row_no = idx + 1;

        let mut label = None;
        let mut params = ParameterSet::new();
        let mut bad_cell = None;

        for (name, field) in headers.iter().zip(record.iter()) {
            if name == "label" {
                label = Some(field.to_string());
                continue;
            }
            match field.parse::<f64>() {
                Ok(value) => {
                    params.set(name, value);
                }
                Err(_) if bad_cell.is_none() => {
                    bad_cell = Some(UnidiffError::invalid_input(format!(
                        "row {}: {} = '{}' is not a number",
                        row_no, name, field
                    )));
                }
                Err(_) => {}
            }
        }

        let fraction_a = params.get("fraction_A");
        let input = match bad_cell {
            Some(err) => Err(err),
            None => params.into_input(),
        };
        rows.push(InputRow {
            label,
            fraction_a,
            input,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "label,D_AB_initial,D_BA_initial,fraction_A,coef_lambda_A,coef_lambda_B,q_A,q_B,theta_A,theta_B,theta_BA,theta_AB,theta_AA,theta_BB,tau_AB,tau_BA,D_exp";

    #[test]
    fn test_parse_rows_with_labels() {
        let content = format!(
            "{}\nmix-1,1e-5,1.2e-5,0.5,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5\n,1e-5,1.2e-5,0.3,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5\n",
            HEADER
        );
        let rows = parse_input_reader(content.as_bytes(), "test").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label_or(1), "mix-1");
        assert_eq!(rows[0].input.as_ref().unwrap().coef_lambda_b, 1.1);
        assert_eq!(rows[1].label_or(2), "row2");
        assert_eq!(rows[1].fraction_a, Some(0.3));
        assert_eq!(rows[1].input.as_ref().unwrap().fraction_a, 0.3);
    }

    #[test]
    fn test_label_column_optional() {
        let header = HEADER.trim_start_matches("label,");
        let content = format!(
            "{}\n1e-5,1.2e-5,0.5,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5\n",
            header
        );
        let rows = parse_input_reader(content.as_bytes(), "test").unwrap();
        assert_eq!(rows[0].label, None);
        assert_eq!(rows[0].label_or(1), "row1");
        assert_eq!(rows[0].input.as_ref().unwrap().d_exp, 1.1e-5);
    }

    #[test]
    fn test_non_numeric_cell_fails_only_its_row() {
        let content = format!(
            "{}\nbad,x,1.2e-5,0.5,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5\ngood,1e-5,1.2e-5,0.4,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5\n",
            HEADER
        );
        let rows = parse_input_reader(content.as_bytes(), "test").unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].label_or(1), "bad");
        assert_eq!(rows[0].fraction_a, Some(0.5));
        let msg = rows[0].input.as_ref().unwrap_err().to_string();
        assert!(msg.contains("row 1"));
        assert!(msg.contains("D_AB_initial"));

        assert!(rows[1].input.is_ok());
    }

    #[test]
    fn test_unknown_column_rejected() {
        let content = format!("{},extra\n", HEADER);
        let err = parse_input_reader(content.as_bytes(), "test").unwrap_err();
        assert!(err.to_string().contains("unknown column 'extra'"));
    }

    #[test]
    fn test_missing_column_reported() {
        let content = "label,fraction_A\nx,0.5\n";
        let err = parse_input_reader(content.as_bytes(), "test").unwrap_err();
        assert!(err.to_string().contains("D_AB_initial"));
    }
}
