//! # 批量执行器
//!
//! 在固定大小的 rayon 线程池上执行逐文件计算，汇总成功/跳过/失败。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, UnidiffError};
use crate::utils::progress;

use rayon::prelude::*;

/// 单个任务处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如输出已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (任务名, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

impl FromIterator<ProcessResult> for BatchResult {
    fn from_iter<I: IntoIterator<Item = ProcessResult>>(iter: I) -> Self {
        let mut batch_result = BatchResult::default();
        for result in iter {
            batch_result.merge(result);
        }
        batch_result
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs = 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表
    pub fn run<T, F>(&self, items: &[T], processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Computing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| UnidiffError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    if let ProcessResult::Failed(name, _) = &result {
                        pb.println(format!("failed: {}", name));
                    }
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();
        Ok(results.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts() {
        let mut result = BatchResult::default();
        result.merge(ProcessResult::Success("a".into()));
        result.merge(ProcessResult::Skipped("b".into()));
        result.merge(ProcessResult::Failed("c".into(), "boom".into()));

        assert_eq!((result.success, result.skipped, result.failed), (1, 1, 1));
        assert_eq!(result.total(), 3);
        assert_eq!(result.failures, vec![("c".to_string(), "boom".to_string())]);
    }

    #[test]
    fn test_collect_into_batch_result() {
        let result: BatchResult = vec![
            ProcessResult::Success("a".into()),
            ProcessResult::Success("b".into()),
            ProcessResult::Failed("c".into(), "boom".into()),
        ]
        .into_iter()
        .collect();

        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 1);
    }

    #[test]
    fn test_run_tallies_all_items() {
        let runner = BatchRunner::new(2);
        assert_eq!(runner.jobs(), 2);

        let items: Vec<u32> = (0..20).collect();
        let result = runner
            .run(&items, |n| match n % 3 {
                0 => ProcessResult::Success(n.to_string()),
                1 => ProcessResult::Skipped(n.to_string()),
                _ => ProcessResult::Failed(n.to_string(), "odd".into()),
            })
            .unwrap();

        assert_eq!(result.total(), 20);
        assert_eq!(result.success, 7);
        assert_eq!(result.skipped, 7);
        assert_eq!(result.failed, 6);
    }

    #[test]
    fn test_zero_jobs_uses_all_cpus() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
    }
}
