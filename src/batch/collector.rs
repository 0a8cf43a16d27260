//! # 文件收集器
//!
//! 根据输入路径和 glob 模式收集待计算的输入文件。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, UnidiffError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配 `*.csv`）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec![Pattern::new("*.csv").unwrap()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    UnidiffError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.patterns.iter().any(|p| p.matches(name)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "").unwrap();
        fs::write(dir.path().join("a.csv"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.csv"), "").unwrap();

        let flat = FileCollector::new(dir.path().to_path_buf()).collect();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let deep = FileCollector::new(dir.path().to_path_buf())
            .recursive(true)
            .collect();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_multiple_patterns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "").unwrap();
        fs::write(dir.path().join("b.tsv"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.csv, *.tsv")
            .unwrap()
            .collect();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_single_file_and_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("input.dat");
        fs::write(&file, "").unwrap();

        assert_eq!(FileCollector::new(file.clone()).collect(), vec![file]);
        assert!(FileCollector::new(dir.path().join("missing"))
            .collect()
            .is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = FileCollector::new(PathBuf::from(".")).with_pattern("[");
        assert!(result.is_err());
    }
}
