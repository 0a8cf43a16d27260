//! # D_AB - x_A 曲线绘制
//!
//! 使用 `plotters` 库绘制扩散系数随组成变化的曲线。
//!
//! ## 功能
//! - 数据点 + 折线
//! - 可选实验参考值水平线
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/results.rs`, `commands/sweep.rs` 调用
//! - 使用 `models/result.rs` 的 CurvePoint
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, UnidiffError};
use crate::models::CurvePoint;

use plotters::prelude::*;
use std::path::Path;

/// 图表参数
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
    /// 实验参考值，给出时绘制水平参考线
    pub reference: Option<f64>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "D_AB vs X_A".to_string(),
            width: 1000,
            height: 750,
            use_svg: false,
            reference: None,
        }
    }
}

/// 生成曲线图
pub fn generate_curve_plot(
    points: &[CurvePoint],
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    if points.is_empty() {
        return Err(UnidiffError::PlotError("No data to plot".to_string()));
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x_a.total_cmp(&b.x_a));

    if options.use_svg {
        let root =
            SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_curve_chart(&root, &sorted, options)?;
        root.present()
            .map_err(|e| UnidiffError::PlotError(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_curve_chart(&root, &sorted, options)?;
        root.present()
            .map_err(|e| UnidiffError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// y 轴范围，留 10% 边距；单点或常数曲线时按量级展开
fn y_bounds(points: &[CurvePoint], reference: Option<f64>) -> (f64, f64) {
    let values = points.iter().map(|p| p.d_ab).chain(reference);

    let y_min = values.clone().fold(f64::INFINITY, f64::min);
    let y_max = values.fold(f64::NEG_INFINITY, f64::max);

    let span = y_max - y_min;
    let margin = if span > 0.0 {
        span * 0.1
    } else {
        (y_max.abs() * 0.1).max(f64::MIN_POSITIVE)
    };

    (y_min - margin, y_max + margin)
}

/// 绘制曲线图的核心逻辑
fn draw_curve_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[CurvePoint],
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?;

    let (y_min, y_max) = y_bounds(points, options.reference);

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..1.0, y_min..y_max)
        .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Mole fraction of A (X_A)")
        .y_desc("D_AB")
        .y_label_formatter(&|y| format!("{:.3e}", y))
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.x_a, p.d_ab)),
            line_color.stroke_width(2),
        ))
        .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?
        .label("D_AB vs X_A")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.x_a, p.d_ab), 5, line_color.filled())),
        )
        .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?;

    if let Some(d_exp) = options.reference {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, d_exp), (1.0, d_exp)],
                RED.stroke_width(1),
            )))
            .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?
            .label("D_exp")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| UnidiffError::PlotError(format!("{:?}", e)))?;

    Ok(())
}
