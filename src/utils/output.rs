//! # 终端输出
//!
//! 状态行统一为 `[TAG] message` 格式，结果数值按名称对齐。
//! 错误输出到 stderr，其余输出到 stdout。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 分隔线宽度
const RULE_WIDTH: usize = 60;

/// 相对误差着色阈值 (%)
const GOOD_AGREEMENT: f64 = 5.0;
const POOR_AGREEMENT: f64 = 20.0;

#[derive(Debug, Clone, Copy)]
enum Status {
    Ok,
    Error,
    Warning,
    Info,
    Skip,
    Done,
}

impl Status {
    fn tag(self) -> ColoredString {
        match self {
            Status::Ok => "[OK]".green().bold(),
            Status::Error => "[ERR]".red().bold(),
            Status::Warning => "[WARN]".yellow().bold(),
            Status::Info => "[*]".blue().bold(),
            Status::Skip => "[SKIP]".dimmed(),
            Status::Done => "[DONE]".green().bold(),
        }
    }
}

fn print_status(status: Status, msg: &str) {
    match status {
        Status::Error => eprintln!("{} {}", status.tag(), msg),
        _ => println!("{} {}", status.tag(), msg),
    }
}

pub fn print_success(msg: &str) {
    print_status(Status::Ok, msg);
}

pub fn print_error(msg: &str) {
    print_status(Status::Error, msg);
}

pub fn print_warning(msg: &str) {
    print_status(Status::Warning, msg);
}

pub fn print_info(msg: &str) {
    print_status(Status::Info, msg);
}

pub fn print_skip(msg: &str) {
    print_status(Status::Skip, msg);
}

pub fn print_done(msg: &str) {
    print_status(Status::Done, msg);
}

/// 打印一个结果量（名称左对齐）
pub fn print_value(name: &str, value: &str) {
    println!("  {} {}", format!("{:<24}", name).cyan(), value.bold());
}

/// 打印相对误差，按与实验值的符合程度着色
pub fn print_relative_error(percent: f64) {
    let text = format!("{:.4}", percent);
    let magnitude = percent.abs();
    let colored = if magnitude <= GOOD_AGREEMENT {
        text.green()
    } else if magnitude <= POOR_AGREEMENT {
        text.yellow()
    } else {
        text.red()
    };
    println!("  {} {}", format!("{:<24}", "Relative error (%)").cyan(), colored.bold());
}

/// 打印标题栏
pub fn print_header(title: &str) {
    println!("\n{}", rule());
    println!("  {}", title.bold());
    println!("{}\n", rule());
}

pub fn print_separator() {
    println!("{}", rule());
}

fn rule() -> ColoredString {
    "─".repeat(RULE_WIDTH).dimmed()
}
