//! # batch 命令实现
//!
//! 逐行计算输入 CSV 中的参数组合。
//!
//! ## 功能
//! - 支持单文件和目录批量处理
//! - 目录模式并行处理（rayon）
//! - 行级错误写入 error 列，不中断整个文件
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块进行文件收集与并行执行
//! - 使用 `parsers/input_csv.rs` 读取输入
//! - 使用 `diffusion/` 计算与导出

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::diffusion::{self, export::BatchRecord};
use crate::error::{Result, UnidiffError};
use crate::parsers;
use crate::utils::output;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const OUTPUT_SUFFIX: &str = "_diffusion.csv";

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Diffusion Calculation");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(UnidiffError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &BatchArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));
    ensure_output_dir(&args.output)?;

    let output_file = output_path_for(&args.input, input_root(&args.input), &args.output);

    match process_file(&args.input, &output_file, args.overwrite) {
        ProcessResult::Success(msg) => {
            output::print_success(&msg);
            Ok(())
        }
        ProcessResult::Skipped(msg) => {
            output::print_skip(&msg);
            Ok(())
        }
        ProcessResult::Failed(_, err) => Err(UnidiffError::Other(err)),
    }
}

/// 目录批量模式
fn execute_batch(args: &BatchArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()
        .into_iter()
        .filter(|f| !is_output_file(f))
        .collect::<Vec<_>>();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} input files", files.len()));
    ensure_output_dir(&args.output)?;

    let jobs: Vec<(PathBuf, PathBuf)> = files
        .into_iter()
        .map(|file| {
            let output_file = output_path_for(&file, &args.input, &args.output);
            (file, output_file)
        })
        .collect();
    let (jobs, collisions) = split_output_collisions(jobs);

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));

    let mut result = runner.run(&jobs, |(file, output_file)| {
        process_file(file, output_file, args.overwrite)
    })?;
    for (file, output_file) in collisions {
        result.merge(ProcessResult::Failed(
            file.display().to_string(),
            format!(
                "output '{}' would be shared with another input",
                output_file.display()
            ),
        ));
    }

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| UnidiffError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })
}

/// 单文件模式下输入路径的相对基准
fn input_root(input: &Path) -> &Path {
    input.parent().unwrap_or_else(|| Path::new(""))
}

/// `<output_dir>/<相对 input_root 的子目录>/<stem>_diffusion.csv`
fn output_path_for(input: &Path, input_root: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");

    let sub_dir = input
        .parent()
        .and_then(|p| p.strip_prefix(input_root).ok())
        .unwrap_or_else(|| Path::new(""));

    output_dir
        .join(sub_dir)
        .join(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// 分离输出路径冲突的任务（如同目录下 `mix.csv` 与 `mix.txt`），冲突各方都不执行
fn split_output_collisions(
    jobs: Vec<(PathBuf, PathBuf)>,
) -> (Vec<(PathBuf, PathBuf)>, Vec<(PathBuf, PathBuf)>) {
    let mut counts: HashMap<PathBuf, usize> = HashMap::new();
    for (_, output_file) in &jobs {
        *counts.entry(output_file.clone()).or_insert(0) += 1;
    }

    jobs.into_iter()
        .partition(|(_, output_file)| counts.get(output_file).copied() == Some(1))
}

/// 本命令自己写出的结果文件，不作为输入
fn is_output_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(OUTPUT_SUFFIX))
        .unwrap_or(false)
}

/// 处理单个输入文件
fn process_file(input: &Path, output_file: &Path, overwrite: bool) -> ProcessResult {
    if output_file.exists() && !overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match compute_file(input, output_file) {
        Ok((total, failed)) => ProcessResult::Success(format!(
            "{} -> {} ({} rows, {} failed)",
            input.display(),
            output_file.display(),
            total,
            failed
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 计算文件中所有行并写出，返回 (总行数, 失败行数)
fn compute_file(input: &Path, output_file: &Path) -> Result<(usize, usize)> {
    let rows = parsers::parse_input_csv(input)?;

    let records: Vec<BatchRecord> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let label = row.label_or(idx + 1);
            let outcome = row.input.and_then(|input| diffusion::compute(&input));
            BatchRecord::from_outcome(label, row.fraction_a, outcome)
        })
        .collect();

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_output_dir(parent)?;
    }
    diffusion::export::batch_to_csv(&records, output_file)?;

    let failed = records.iter().filter(|r| !r.is_ok()).count();
    Ok((records.len(), failed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
label,D_AB_initial,D_BA_initial,fraction_A,coef_lambda_A,coef_lambda_B,q_A,q_B,theta_A,theta_B,theta_BA,theta_AB,theta_AA,theta_BB,tau_AB,tau_BA,D_exp
ref,1e-5,1.2e-5,0.5,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5
edge,1e-5,1.2e-5,1.0,1.0,1.1,0.9,1.0,0.5,0.5,0.4,0.6,0.5,0.5,1.2,0.9,1.1e-5
";

    fn batch_args(input: &Path, output: &Path) -> BatchArgs {
        BatchArgs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            pattern: "*.csv".to_string(),
            jobs: 2,
            recursive: true,
            overwrite: false,
        }
    }

    #[test]
    fn test_output_path_for() {
        let path = output_path_for(Path::new("data/mix.csv"), Path::new("data"), Path::new("out"));
        assert_eq!(path, PathBuf::from("out/mix_diffusion.csv"));

        let nested = output_path_for(
            Path::new("data/a/b/mix.csv"),
            Path::new("data"),
            Path::new("out"),
        );
        assert_eq!(nested, PathBuf::from("out/a/b/mix_diffusion.csv"));

        let single = Path::new("mix.csv");
        assert_eq!(
            output_path_for(single, input_root(single), Path::new("out")),
            PathBuf::from("out/mix_diffusion.csv")
        );
    }

    #[test]
    fn test_split_output_collisions() {
        let jobs = vec![
            (PathBuf::from("in/mix.csv"), PathBuf::from("out/mix_diffusion.csv")),
            (PathBuf::from("in/mix.txt"), PathBuf::from("out/mix_diffusion.csv")),
            (PathBuf::from("in/other.csv"), PathBuf::from("out/other_diffusion.csv")),
        ];
        let (unique, collisions) = split_output_collisions(jobs);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].0, PathBuf::from("in/other.csv"));
        assert_eq!(collisions.len(), 2);
    }

    #[test]
    fn test_recursive_batch_keeps_same_named_inputs_apart() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let out = dir.path().join("out");
        fs::create_dir_all(input.join("a")).unwrap();
        fs::create_dir_all(input.join("b")).unwrap();
        fs::write(input.join("a").join("mix.csv"), INPUT.replace("ref,", "A,")).unwrap();
        fs::write(input.join("b").join("mix.csv"), INPUT.replace("ref,", "B,")).unwrap();

        execute_batch(&batch_args(&input, &out)).unwrap();

        let a = fs::read_to_string(out.join("a").join("mix_diffusion.csv")).unwrap();
        let b = fs::read_to_string(out.join("b").join("mix_diffusion.csv")).unwrap();
        assert!(a.lines().nth(1).unwrap().starts_with("A,"));
        assert!(b.lines().nth(1).unwrap().starts_with("B,"));
        assert!(!out.join("mix_diffusion.csv").exists());
    }

    #[test]
    fn test_is_output_file() {
        assert!(is_output_file(Path::new("out/mix_diffusion.csv")));
        assert!(!is_output_file(Path::new("out/mix.csv")));
    }

    #[test]
    fn test_process_file_records_row_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mix.csv");
        fs::write(&input, INPUT).unwrap();

        let output_file = dir.path().join("mix_diffusion.csv");
        let result = process_file(&input, &output_file, false);
        assert!(matches!(result, ProcessResult::Success(ref msg) if msg.contains("2 rows, 1 failed")));

        let content = fs::read_to_string(dir.path().join("mix_diffusion.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ref,0.5,"));
        assert!(lines[1].ends_with(','));
        assert!(lines[2].starts_with("edge,1.0,,,Invalid input"));
    }

    #[test]
    fn test_process_file_records_unparsable_cells() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mix.csv");
        fs::write(&input, INPUT.replace("edge,1e-5", "edge,abc")).unwrap();

        let output_file = dir.path().join("mix_diffusion.csv");
        let result = process_file(&input, &output_file, false);
        assert!(matches!(result, ProcessResult::Success(ref msg) if msg.contains("2 rows, 1 failed")));

        let content = fs::read_to_string(&output_file).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[1].starts_with("ref,0.5,"));
        assert!(lines[2].starts_with("edge,1.0,,,Invalid input: row 2: D_AB_initial = 'abc'"));
    }

    #[test]
    fn test_process_file_skips_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mix.csv");
        fs::write(&input, INPUT).unwrap();
        let output_file = dir.path().join("mix_diffusion.csv");
        fs::write(&output_file, "old").unwrap();

        assert!(matches!(
            process_file(&input, &output_file, false),
            ProcessResult::Skipped(_)
        ));
        assert!(matches!(
            process_file(&input, &output_file, true),
            ProcessResult::Success(_)
        ));
    }

    #[test]
    fn test_process_file_reports_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.csv");
        fs::write(&input, "label,unknown\nx,1\n").unwrap();

        assert!(matches!(
            process_file(&input, &dir.path().join("broken_diffusion.csv"), false),
            ProcessResult::Failed(..)
        ));
    }
}
