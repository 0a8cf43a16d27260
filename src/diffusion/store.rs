//! # 结果存储
//!
//! 以 CSV (`X_A,D_AB`) 形式保存每次计算得到的 (x_A, D_AB) 点，
//! 供结果表格和曲线绘制使用。
//!
//! ## 规则
//! - 首次使用时创建文件并写入表头
//! - 已存在相同 x_A 的行时不再追加
//! - reset 将文件截断为仅含表头
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs`, `commands/sweep.rs`, `commands/results.rs` 使用
//! - 使用 `csv` 库读写

use crate::error::{Result, UnidiffError};
use crate::models::CurvePoint;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const HEADER: [&str; 2] = ["X_A", "D_AB"];

/// 追加结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// 新增一行
    Added,
    /// 已有相同 x_A 的记录
    Existing,
}

/// CSV 结果存储
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// 读取全部记录，文件不存在时返回空列表
    pub fn load(&self) -> Result<Vec<CurvePoint>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&self.path)?;
        let mut points = Vec::new();
        for record in rdr.deserialize() {
            let point: CurvePoint = record?;
            points.push(point);
        }
        Ok(points)
    }

    /// 按 x_A 升序读取记录
    pub fn load_sorted(&self) -> Result<Vec<CurvePoint>> {
        let mut points = self.load()?;
        points.sort_by(|a, b| a.x_a.total_cmp(&b.x_a));
        Ok(points)
    }

    /// 追加一个点；相同 x_A 已存在时不写入
    pub fn record(&self, point: CurvePoint) -> Result<RecordOutcome> {
        if self.load()?.iter().any(|p| p.x_a == point.x_a) {
            return Ok(RecordOutcome::Existing);
        }

        self.append(&[point])?;
        Ok(RecordOutcome::Added)
    }

    /// 追加多个点，返回实际新增的数量
    pub fn record_all(&self, points: &[CurvePoint]) -> Result<usize> {
        let mut known: Vec<f64> = self.load()?.iter().map(|p| p.x_a).collect();
        let mut fresh = Vec::new();

        for point in points {
            if !known.contains(&point.x_a) {
                known.push(point.x_a);
                fresh.push(*point);
            }
        }

        if !fresh.is_empty() {
            self.append(&fresh)?;
        }
        Ok(fresh.len())
    }

    /// 清空记录（保留表头），文件不存在时返回 `false`
    pub fn reset(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        self.write_header_only()?;
        Ok(true)
    }

    /// 确保文件存在且带表头
    pub fn ensure_initialized(&self) -> Result<()> {
        let is_empty = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        if is_empty {
            self.write_header_only()?;
        }
        Ok(())
    }

    fn write_header_only(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record(HEADER)?;
        wtr.flush().map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn append(&self, points: &[CurvePoint]) -> Result<()> {
        self.ensure_initialized()?;

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        for point in points {
            wtr.serialize(point)?;
        }

        wtr.flush().map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> UnidiffError {
        UnidiffError::FileWriteError {
            path: self.path.display().to_string(),
            source,
        }
    }
}
