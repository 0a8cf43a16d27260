//! # results 命令实现
//!
//! 结果存储的显示、绘图与清空。
//!
//! ## 依赖关系
//! - 使用 `cli/results.rs` 定义的参数
//! - 使用 `diffusion/store.rs`, `diffusion/plot.rs`

use crate::cli::params::StoreArgs;
use crate::cli::results::{PlotArgs, PlotFormat, ResultsArgs, ResultsCommands};
use crate::diffusion::{plot, ResultStore};
use crate::error::Result;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 执行 results 命令
pub fn execute(args: ResultsArgs) -> Result<()> {
    match args.command {
        ResultsCommands::Show(store_args) => show(&store_args),
        ResultsCommands::Plot(plot_args) => plot_curve(&plot_args),
        ResultsCommands::Reset(store_args) => reset(&store_args),
    }
}

/// 表格显示已存储的结果
fn show(args: &StoreArgs) -> Result<()> {
    #[derive(Tabled)]
    struct ResultRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "X_A")]
        x_a: String,
        #[tabled(rename = "D_AB")]
        d_ab: String,
    }

    let store = ResultStore::new(&args.store);
    let points = store.load_sorted()?;

    if points.is_empty() {
        output::print_warning(&format!(
            "No results found in '{}'. Run a calculation first.",
            store.path().display()
        ));
        return Ok(());
    }

    let rows: Vec<ResultRow> = points
        .iter()
        .enumerate()
        .map(|(i, p)| ResultRow {
            index: i + 1,
            x_a: format!("{}", p.x_a),
            d_ab: format!("{:.6e}", p.d_ab),
        })
        .collect();

    output::print_header(&format!("Stored Results ({})", rows.len()));
    println!("{}", Table::new(&rows));
    Ok(())
}

/// 绘制已存储结果的曲线
fn plot_curve(args: &PlotArgs) -> Result<()> {
    let store = ResultStore::new(&args.store.store);
    let points = store.load_sorted()?;

    if points.is_empty() {
        output::print_warning("No data available to generate the curve.");
        return Ok(());
    }

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    let options = plot::PlotOptions {
        title: args.title.clone(),
        width: args.width,
        height: args.height,
        use_svg: format == PlotFormat::Svg,
        reference: args.d_exp,
    };

    plot::generate_curve_plot(&points, &args.output, &options)?;
    output::print_success(&format!(
        "Curve with {} points saved to '{}'",
        points.len(),
        args.output.display()
    ));
    Ok(())
}

/// 清空结果存储
fn reset(args: &StoreArgs) -> Result<()> {
    let store = ResultStore::new(&args.store);
    if store.reset()? {
        output::print_success(&format!(
            "Results in '{}' have been reset.",
            store.path().display()
        ));
    } else {
        output::print_warning(&format!(
            "No data to reset: '{}' does not exist.",
            store.path().display()
        ));
    }
    Ok(())
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> PlotFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => PlotFormat::Svg,
        _ => PlotFormat::Png,
    }
}
