//! # 反冲能曲线图
//!
//! 上下两栏：上栏为全角度范围，下栏为小角度放大。每个入射能量一条曲线。
//!
//! ## 依赖关系
//! - 被 `commands/lines.rs` 和 `commands/all.rs` 调用
//! - 使用 `kinematics/grid.rs` 的 RecoilCurve

use super::{finite_segments, plot_err, FigureOptions, ANGLE_LABEL, RECOIL_LABEL};
use crate::error::Result;
use crate::kinematics::RecoilCurve;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// matplotlib 默认配色
const CURVE_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// 生成两栏曲线图
pub fn generate_lines_plot(
    curves: &[RecoilCurve],
    zoom_max_deg: f64,
    output_path: &Path,
    opts: &FigureOptions,
) -> Result<()> {
    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_lines_figure(&root, curves, zoom_max_deg, &opts.title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_lines_figure(&root, curves, zoom_max_deg, &opts.title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_lines_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curves: &[RecoilCurve],
    zoom_max_deg: f64,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let root = root
        .titled(title, ("sans-serif", 28).into_font())
        .map_err(plot_err)?;
    let panels = root.split_evenly((2, 1));

    let (full_range, zoom_range) = panel_ranges(curves, zoom_max_deg);
    let zoomed: Vec<RecoilCurve> = curves.iter().map(|c| c.truncated(zoom_max_deg)).collect();

    draw_panel(&panels[0], curves, full_range, false)?;
    draw_panel(&panels[1], &zoomed, zoom_range, true)?;

    Ok(())
}

/// 上下两栏的角度范围：上栏为曲线的实际角度跨度，下栏从最小角度到放大上限
pub fn panel_ranges(curves: &[RecoilCurve], zoom_max_deg: f64) -> (Range<f64>, Range<f64>) {
    let (x_min, x_max) = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|(a, _)| *a))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), a| {
            (lo.min(a), hi.max(a))
        });
    if x_min > x_max {
        return (0.0..1.0, 0.0..zoom_max_deg.max(1.0));
    }

    let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
    let zoom_max = if zoom_max_deg > x_min {
        zoom_max_deg.min(x_max)
    } else {
        x_max
    };
    (x_min..x_max, x_min..zoom_max)
}

/// 绘制单栏
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    curves: &[RecoilCurve],
    x_range: Range<f64>,
    with_legend: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let y_max = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|(_, e)| *e))
        .filter(|e| e.is_finite())
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..y_max)
        .map_err(plot_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.y_desc(RECOIL_LABEL)
        .x_label_style(("sans-serif", 14))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16));
    if with_legend {
        mesh.x_desc(ANGLE_LABEL);
    }
    mesh.draw().map_err(plot_err)?;

    for (i, curve) in curves.iter().enumerate() {
        let color = CURVE_COLORS[i % CURVE_COLORS.len()];

        for (k, segment) in finite_segments(&curve.points).into_iter().enumerate() {
            let series = chart
                .draw_series(LineSeries::new(segment, color.stroke_width(2)))
                .map_err(plot_err)?;

            // 每条曲线只登记一次图例
            if k == 0 {
                series.label(curve.label.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
    }

    if with_legend && !curves.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}
