//! # sweep 命令实现
//!
//! 固定其余参数，按步长扫描 x_A 并计算 D_AB 曲线。
//!
//! ## 功能
//! - 导出 CSV (X_A, D_AB, relative_error_percent)
//! - 可选绘制曲线 (PNG/SVG)
//! - 可选写入结果存储
//!
//! ## 依赖关系
//! - 使用 `cli/sweep.rs` 定义的参数
//! - 使用 `diffusion/` 的计算、导出、绘图与存储

use crate::cli::sweep::SweepArgs;
use crate::diffusion::{self, export, plot, ResultStore};
use crate::error::{Result, UnidiffError};
use crate::models::{CalculationInput, CurvePoint, DiffusionResult};
use crate::utils::output;

use std::path::Path;

/// 摩尔分数网格点保留的小数位
const GRID_DECIMALS: i32 = 10;

/// 单次扫描的最大网格点数
const MAX_GRID_POINTS: usize = 1_000_000;

/// 执行 sweep 命令
pub fn execute(args: SweepArgs) -> Result<()> {
    output::print_header("Mole Fraction Sweep");

    let (x_min, x_max) = parse_fraction_range(&args.range)?;
    let grid = fraction_grid(x_min, x_max, args.step)?;
    output::print_info(&format!(
        "X_A from {} to {} in {} points",
        x_min,
        x_max,
        grid.len()
    ));

    // 扫描时 fraction_A 由网格给出，参数中可以省略
    let mut params = super::resolve_parameters(&args.params)?;
    if params.get("fraction_A").is_none() {
        params.set("fraction_A", x_min);
    }
    let base = params.into_input()?;
    if args.params.require_positive {
        base.ensure_all_positive()?;
    }

    let points = run_sweep(&base, &grid)?;

    export::sweep_to_csv(&points, &args.output)?;
    output::print_success(&format!(
        "Sweep data saved to '{}'",
        args.output.display()
    ));

    let curve: Vec<CurvePoint> = points
        .iter()
        .map(|(x, r)| CurvePoint::new(*x, r.d_ab))
        .collect();

    if let Some(ref plot_path) = args.plot {
        let options = plot::PlotOptions {
            title: "D_AB vs X_A (sweep)".to_string(),
            use_svg: is_svg(plot_path),
            reference: Some(base.d_exp),
            ..plot::PlotOptions::default()
        };
        plot::generate_curve_plot(&curve, plot_path, &options)?;
        output::print_success(&format!("Curve saved to '{}'", plot_path.display()));
    }

    if args.record {
        let store = ResultStore::new(&args.store.store);
        let added = store.record_all(&curve)?;
        output::print_info(&format!(
            "Recorded {} new point(s) in '{}' ({} already present)",
            added,
            store.path().display(),
            curve.len() - added
        ));
    }

    let closest = points.iter().min_by(|a, b| {
        a.1.relative_error_percent
            .total_cmp(&b.1.relative_error_percent)
    });
    if let Some((x, best)) = closest {
        output::print_done(&format!(
            "Closest to D_exp at X_A = {}: D_AB = {:.6e} ({:.4} %)",
            x, best.d_ab, best.relative_error_percent
        ));
    }

    Ok(())
}

/// 在网格上逐点计算
fn run_sweep(base: &CalculationInput, grid: &[f64]) -> Result<Vec<(f64, DiffusionResult)>> {
    grid.iter()
        .map(|&x| diffusion::compute(&base.with_fraction_a(x)).map(|r| (x, r)))
        .collect()
}

/// 生成 [min, max] 上步长为 step 的网格，末端允许浮点误差
fn fraction_grid(min: f64, max: f64, step: f64) -> Result<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(UnidiffError::InvalidArgument(format!(
            "step must be positive (got {})",
            step
        )));
    }

    let count = ((max - min) / step + 1e-9).floor() + 1.0;
    if !count.is_finite() || count < 1.0 || count > MAX_GRID_POINTS as f64 {
        return Err(UnidiffError::InvalidArgument(format!(
            "step {} gives too many grid points (at most {} allowed)",
            step, MAX_GRID_POINTS
        )));
    }
    let n = count as usize;
    let scale = 10f64.powi(GRID_DECIMALS);

    Ok((0..n)
        .map(|i| ((min + i as f64 * step) * scale).round() / scale)
        .collect())
}

/// 解析 x_A 范围，两端都必须在 (0, 1) 内
fn parse_fraction_range(range: &str) -> Result<(f64, f64)> {
    let (lo, hi) =
        split_range(range).ok_or_else(|| UnidiffError::InvalidRange(range.to_string()))?;

    let min: f64 = lo
        .trim()
        .parse()
        .map_err(|_| UnidiffError::InvalidRange(range.to_string()))?;
    let max: f64 = hi
        .trim()
        .parse()
        .map_err(|_| UnidiffError::InvalidRange(range.to_string()))?;

    if !min.is_finite() || !max.is_finite() || min <= 0.0 || max >= 1.0 || max < min {
        return Err(UnidiffError::InvalidRange(format!(
            "{} (must be 0 < min <= max < 1)",
            range
        )));
    }

    Ok((min, max))
}

/// 在第一个分隔用的 `-` 处切分；指数中的 `e-` 不是分隔符
fn split_range(range: &str) -> Option<(&str, &str)> {
    let bytes = range.as_bytes();
    let pos = bytes.iter().enumerate().skip(1).position(|(i, &b)| {
        b == b'-' && !matches!(bytes[i - 1], b'e' | b'E')
    })? + 1;

    let (lo, hi) = (&range[..pos], &range[pos + 1..]);
    if hi.is_empty() {
        return None;
    }
    Some((lo, hi))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> CalculationInput {
        CalculationInput {
            d_ab_initial: 1e-5,
            d_ba_initial: 1.2e-5,
            fraction_a: 0.5,
            coef_lambda_a: 1.0,
            coef_lambda_b: 1.1,
            q_a: 0.9,
            q_b: 1.0,
            theta_a: 0.5,
            theta_b: 0.5,
            theta_ba: 0.4,
            theta_ab: 0.6,
            theta_aa: 0.5,
            theta_bb: 0.5,
            tau_ab: 1.2,
            tau_ba: 0.9,
            d_exp: 1.1e-5,
        }
    }

    #[test]
    fn test_parse_fraction_range() {
        assert_eq!(parse_fraction_range("0.1-0.9").unwrap(), (0.1, 0.9));
        assert_eq!(parse_fraction_range("0.5-0.5").unwrap(), (0.5, 0.5));
        assert!(parse_fraction_range("0-0.9").is_err());
        assert!(parse_fraction_range("0.1-1").is_err());
        assert!(parse_fraction_range("0.9-0.1").is_err());
        assert!(parse_fraction_range("0.1").is_err());
        assert!(parse_fraction_range("a-b").is_err());
        assert!(parse_fraction_range("0.1-0.5-0.9").is_err());
    }

    #[test]
    fn test_parse_fraction_range_scientific_notation() {
        assert_eq!(parse_fraction_range("1e-3-0.5").unwrap(), (1e-3, 0.5));
        assert_eq!(parse_fraction_range("1E-3-5e-1").unwrap(), (1e-3, 0.5));
        assert_eq!(parse_fraction_range("0.1 - 0.9").unwrap(), (0.1, 0.9));
    }

    #[test]
    fn test_parse_fraction_range_rejects_non_finite() {
        assert!(parse_fraction_range("nan-0.5").is_err());
        assert!(parse_fraction_range("0.1-NaN").is_err());
        assert!(parse_fraction_range("0.1-inf").is_err());
    }

    #[test]
    fn test_fraction_grid_includes_end_point() {
        let grid = fraction_grid(0.1, 0.9, 0.1).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[2], 0.3);
        assert_eq!(grid[8], 0.9);
    }

    #[test]
    fn test_fraction_grid_rejects_bad_step() {
        assert!(fraction_grid(0.1, 0.9, 0.0).is_err());
        assert!(fraction_grid(0.1, 0.9, -0.1).is_err());
        assert!(fraction_grid(0.1, 0.9, f64::NAN).is_err());
    }

    #[test]
    fn test_fraction_grid_rejects_too_many_points() {
        assert!(matches!(
            fraction_grid(0.1, 0.9, 1e-300),
            Err(UnidiffError::InvalidArgument(_))
        ));
        assert!(fraction_grid(0.1, 0.9, 1e-10).is_err());

        let dense = fraction_grid(0.1, 0.9, 1e-5).unwrap();
        assert!(dense.len() > 80_000 && dense.len() <= MAX_GRID_POINTS);
    }

    #[test]
    fn test_run_sweep_matches_single_calculation() {
        let grid = fraction_grid(0.3, 0.5, 0.2).unwrap();
        let points = run_sweep(&base_input(), &grid).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, 0.3);
        let single = diffusion::compute(&base_input().with_fraction_a(0.3)).unwrap();
        assert_eq!(points[0].1, single);
        assert!((points[1].1.d_ab - 1.1515832072691676e-05).abs() < 1e-16);
    }

    #[test]
    fn test_run_sweep_propagates_invalid_parameters() {
        let input = CalculationInput {
            tau_ab: 0.0,
            ..base_input()
        };
        assert!(run_sweep(&input, &[0.5]).is_err());
    }

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("curve.SVG")));
        assert!(!is_svg(Path::new("curve.png")));
        assert!(!is_svg(Path::new("curve")));
    }
}
