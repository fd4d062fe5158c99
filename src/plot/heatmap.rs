//! # 反冲能热图
//!
//! 在 (散射角, 入射能量) 平面上按 viridis 着色，右侧附色标。
//! NaN 单元格留白；整个网格都越界时只画坐标轴和占位色标。
//!
//! ## 依赖关系
//! - 被 `commands/heatmap.rs` 和 `commands/all.rs` 调用
//! - 使用 `kinematics/grid.rs` 的 RecoilGrid
//! - 使用 `plot/colormap.rs` 取色

use super::colormap::viridis_scaled;
use super::{plot_err, FigureOptions, ANGLE_LABEL, ENERGY_LABEL, RECOIL_LABEL};
use crate::error::Result;
use crate::kinematics::RecoilGrid;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const COLORBAR_WIDTH: u32 = 130;
const COLORBAR_STEPS: usize = 200;
/// 没有有限值时的占位色标范围 (keVnr)
const PLACEHOLDER_RANGE: (f64, f64) = (0.0, 1.0);

/// 生成热图
pub fn generate_heatmap(grid: &RecoilGrid, output_path: &Path, opts: &FigureOptions) -> Result<()> {
    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_heatmap(&root, grid, &opts.title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_heatmap(&root, grid, &opts.title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 色标范围：有限值的最小/最大值，全为 NaN 时用占位范围
pub fn color_range(grid: &RecoilGrid) -> (f64, f64) {
    grid.finite_range().unwrap_or(PLACEHOLDER_RANGE)
}

/// 轴上每个采样点对应单元格的边界（相邻点中点，两端外推半步）
pub fn cell_edges(axis: &[f64]) -> Vec<f64> {
    match axis.len() {
        0 => Vec::new(),
        1 => vec![axis[0] - 0.5, axis[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(axis[0] - (axis[1] - axis[0]) / 2.0);
            for w in axis.windows(2) {
                edges.push((w[0] + w[1]) / 2.0);
            }
            edges.push(axis[n - 1] + (axis[n - 1] - axis[n - 2]) / 2.0);
            edges
        }
    }
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &RecoilGrid,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (v_min, v_max) = color_range(grid);

    let x_edges = cell_edges(&grid.mesh.angles_deg);
    let y_edges = cell_edges(&grid.mesh.energies_kev);
    let (x_lo, x_hi) = (x_edges[0], x_edges[x_edges.len() - 1]);
    let (y_lo, y_hi) = (y_edges[0], y_edges[y_edges.len() - 1]);

    let (width, _) = root.dim_in_pixel();
    let (main_area, bar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    let mut chart = ChartBuilder::on(&main_area)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(ANGLE_LABEL)
        .y_desc(ENERGY_LABEL)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    let (x_edges, y_edges) = (&x_edges, &y_edges);
    let cells = grid.values.iter().enumerate().flat_map(move |(i, row)| {
        let (y0, y1) = (y_edges[i], y_edges[i + 1]);
        row.iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(move |(j, v)| {
                Rectangle::new(
                    [(x_edges[j], y0), (x_edges[j + 1], y1)],
                    viridis_scaled(*v, v_min, v_max).filled(),
                )
            })
    });
    chart.draw_series(cells).map_err(plot_err)?;

    draw_colorbar(&bar_area, v_min, v_max)?;

    Ok(())
}

/// 竖直色标
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    v_min: f64,
    v_max: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let v_max = if v_max > v_min { v_max } else { v_min + 1.0 };
    let step = (v_max - v_min) / COLORBAR_STEPS as f64;

    let mut bar = ChartBuilder::on(area)
        .margin_top(68)
        .margin_bottom(70)
        .margin_right(10)
        .y_label_area_size(75)
        .build_cartesian_2d(0.0..1.0, v_min..v_max)
        .map_err(plot_err)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(RECOIL_LABEL)
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(plot_err)?;

    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let lo = v_min + k as f64 * step;
        let hi = lo + step;
        Rectangle::new(
            [(0.0, lo), (1.0, hi)],
            viridis_scaled((lo + hi) / 2.0, v_min, v_max).filled(),
        )
    }))
    .map_err(plot_err)?;

    Ok(())
}
