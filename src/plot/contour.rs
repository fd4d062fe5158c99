//! # 等值线提取与等值线图
//!
//! 用 marching squares 从规则网格提取给定反冲能的等值线段，再用 `plotters` 绘制，
//! 每条等值线带数值标注，右侧附离散色标。
//!
//! ## 算法
//! 1. 对每个网格单元，四个角点中任一为 NaN 则跳过
//! 2. 按角点与等值的高低关系找出穿越的边，线性插值得到交点
//! 3. 四个交点（鞍点）时用单元中心平均值决定连接方式
//!
//! ## 依赖关系
//! - 被 `commands/contour.rs` 和 `commands/all.rs` 调用
//! - 使用 `kinematics/grid.rs` 的 RecoilGrid
//! - 使用 `plot/colormap.rs` 取色

use super::colormap::viridis;
use super::{plot_err, FigureOptions, ANGLE_LABEL, ENERGY_LABEL, RECOIL_LABEL};
use crate::error::Result;
use crate::kinematics::RecoilGrid;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 默认等值线（keV）
pub const DEFAULT_LEVELS: [f64; 13] = [
    0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0,
];

/// 放大图等值线（keV）
pub const ZOOM_LEVELS: [f64; 12] = [
    0.1, 0.2, 0.3, 0.4, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0, 4.0,
];

const COLORBAR_WIDTH: u32 = 150;

type Point = (f64, f64);

/// 单个等值的全部线段
#[derive(Debug, Clone)]
pub struct ContourLine {
    pub level: f64,
    pub segments: Vec<[Point; 2]>,
}

/// 从网格提取所有等值线
pub fn extract_contours(grid: &RecoilGrid, levels: &[f64]) -> Vec<ContourLine> {
    levels
        .iter()
        .map(|&level| ContourLine {
            level,
            segments: march(grid, level),
        })
        .collect()
}

/// 单一等值的 marching squares
fn march(grid: &RecoilGrid, level: f64) -> Vec<[Point; 2]> {
    let xs = &grid.mesh.angles_deg;
    let ys = &grid.mesh.energies_kev;
    let v = &grid.values;
    let mut segments = Vec::new();

    if xs.len() < 2 || ys.len() < 2 {
        return segments;
    }

    for i in 0..ys.len() - 1 {
        for j in 0..xs.len() - 1 {
            let v00 = v[i][j];
            let v10 = v[i][j + 1];
            let v11 = v[i + 1][j + 1];
            let v01 = v[i + 1][j];
            if ![v00, v10, v11, v01].iter().all(|c| c.is_finite()) {
                continue;
            }

            let (x0, x1, y0, y1) = (xs[j], xs[j + 1], ys[i], ys[i + 1]);

            // 边顺序：下、右、上、左
            let bottom = crossing(level, (x0, y0), v00, (x1, y0), v10);
            let right = crossing(level, (x1, y0), v10, (x1, y1), v11);
            let top = crossing(level, (x0, y1), v01, (x1, y1), v11);
            let left = crossing(level, (x0, y0), v00, (x0, y1), v01);

            let hits: Vec<Point> = [bottom, right, top, left].into_iter().flatten().collect();

            match hits.len() {
                2 => segments.push([hits[0], hits[1]]),
                4 => {
                    let (pb, pr, pt, pl) = (hits[0], hits[1], hits[2], hits[3]);
                    let center = (v00 + v10 + v11 + v01) / 4.0;
                    if (center >= level) == (v00 >= level) {
                        segments.push([pb, pr]);
                        segments.push([pt, pl]);
                    } else {
                        segments.push([pl, pb]);
                        segments.push([pr, pt]);
                    }
                }
                _ => {}
            }
        }
    }

    segments
}

/// 边上的等值交点，等值落在两端之间时返回插值位置
fn crossing(level: f64, pa: Point, va: f64, pb: Point, vb: f64) -> Option<Point> {
    if (va >= level) == (vb >= level) {
        return None;
    }
    let t = (level - va) / (vb - va);
    Some((pa.0 + t * (pb.0 - pa.0), pa.1 + t * (pb.1 - pa.1)))
}

/// 等值的格式化标签（去掉多余的零）
pub fn format_level(level: f64) -> String {
    let s = format!("{:.3}", level);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// 第 k 个等值的颜色
fn level_color(k: usize, count: usize) -> RGBColor {
    if count <= 1 {
        viridis(0.5)
    } else {
        viridis(k as f64 / (count - 1) as f64)
    }
}

/// 生成等值线图
pub fn generate_contour_plot(
    grid: &RecoilGrid,
    levels: &[f64],
    output_path: &Path,
    opts: &FigureOptions,
) -> Result<()> {
    let contours = extract_contours(grid, levels);

    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_contour_chart(&root, grid, &contours, &opts.title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_contour_chart(&root, grid, &contours, &opts.title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_contour_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &RecoilGrid,
    contours: &[ContourLine],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let xs = &grid.mesh.angles_deg;
    let ys = &grid.mesh.energies_kev;
    let x_range = xs.first().copied().unwrap_or(0.0)..xs.last().copied().unwrap_or(180.0);
    let y_range = ys.first().copied().unwrap_or(0.0)..ys.last().copied().unwrap_or(1.0);

    let (width, _) = root.dim_in_pixel();
    let (main_area, bar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    let mut chart = ChartBuilder::on(&main_area)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(ANGLE_LABEL)
        .y_desc(ENERGY_LABEL)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .light_line_style(&WHITE.mix(0.0))
        .bold_line_style(&BLACK.mix(0.15))
        .draw()
        .map_err(plot_err)?;

    let count = contours.len();
    for (k, contour) in contours.iter().enumerate() {
        let color = level_color(k, count);

        chart
            .draw_series(
                contour
                    .segments
                    .iter()
                    .map(|seg| PathElement::new(seg.to_vec(), color.stroke_width(2))),
            )
            .map_err(plot_err)?;

        // 等值标注放在中间那条线段上
        if let Some(seg) = contour.segments.get(contour.segments.len() / 2) {
            let mid = ((seg[0].0 + seg[1].0) / 2.0, (seg[0].1 + seg[1].1) / 2.0);
            chart
                .draw_series(std::iter::once(Text::new(
                    format_level(contour.level),
                    mid,
                    ("sans-serif", 12).into_font().color(&color),
                )))
                .map_err(plot_err)?;
        }
    }

    draw_level_bar(&bar_area, contours)?;

    Ok(())
}

/// 离散色标：每个等值一格
fn draw_level_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    contours: &[ContourLine],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let count = contours.len().max(1);

    let mut bar = ChartBuilder::on(area)
        .caption(RECOIL_LABEL, ("sans-serif", 14).into_font())
        .margin_top(40)
        .margin_bottom(70)
        .margin_right(10)
        .build_cartesian_2d(0.0..2.0, 0.0..count as f64)
        .map_err(plot_err)?;

    let total = contours.len();
    bar.draw_series(contours.iter().enumerate().map(|(k, _)| {
        Rectangle::new(
            [(0.0, k as f64), (0.8, (k + 1) as f64)],
            level_color(k, total).filled(),
        )
    }))
    .map_err(plot_err)?;

    bar.draw_series(contours.iter().enumerate().map(|(k, c)| {
        Text::new(
            format_level(c.level),
            (0.95, k as f64 + 0.7),
            ("sans-serif", 14).into_font().color(&BLACK),
        )
    }))
    .map_err(plot_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::{linspace, EvalStrategy, MeshGrid};
    use crate::kinematics::masses::{ELECTRON, GERMANIUM, NEUTRON};

    fn grid_from(xs: Vec<f64>, ys: Vec<f64>, values: Vec<Vec<f64>>) -> RecoilGrid {
        RecoilGrid {
            mesh: MeshGrid::new(xs, ys),
            values,
        }
    }

    #[test]
    fn test_single_cell_crossing() {
        // 值沿 x 方向线性增长：0 → 2
        let grid = grid_from(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 2.0], vec![0.0, 2.0]],
        );
        let lines = extract_contours(&grid, &[1.0]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].segments.len(), 1);

        let seg = lines[0].segments[0];
        assert!((seg[0].0 - 0.5).abs() < 1e-12);
        assert!((seg[1].0 - 0.5).abs() < 1e-12);
        let (ya, yb) = (seg[0].1.min(seg[1].1), seg[0].1.max(seg[1].1));
        assert_eq!((ya, yb), (0.0, 1.0));
    }

    #[test]
    fn test_level_outside_range_has_no_segments() {
        let grid = grid_from(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 2.0], vec![0.0, 2.0]],
        );
        let lines = extract_contours(&grid, &[5.0, -1.0]);
        assert!(lines.iter().all(|l| l.segments.is_empty()));
    }

    #[test]
    fn test_saddle_produces_two_segments() {
        let grid = grid_from(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        );
        let lines = extract_contours(&grid, &[0.5]);
        assert_eq!(lines[0].segments.len(), 2);
    }

    #[test]
    fn test_nan_cells_skipped() {
        let grid = grid_from(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 2.0, f64::NAN], vec![0.0, 2.0, f64::NAN]],
        );
        let lines = extract_contours(&grid, &[1.0]);
        assert_eq!(lines[0].segments.len(), 1);

        // 中子打电子时大部分角度越界，提取过程不应出错
        let mesh = MeshGrid::new(linspace(0.0, 180.0, 90), linspace(50.0, 700.0, 20));
        let nan_grid = mesh.evaluate(ELECTRON, NEUTRON, EvalStrategy::Vectorized);
        let _ = extract_contours(&nan_grid, &DEFAULT_LEVELS);
    }

    #[test]
    fn test_germanium_contour_points_lie_on_level() {
        let mesh = MeshGrid::new(linspace(0.0, 180.0, 180), linspace(50.0, 700.0, 65));
        let grid = mesh.evaluate(GERMANIUM, NEUTRON, EvalStrategy::Vectorized);
        let lines = extract_contours(&grid, &DEFAULT_LEVELS);

        assert_eq!(lines.len(), DEFAULT_LEVELS.len());
        // 锗的最大反冲能约 4mM/(m+M)² · 700 ≈ 38 keV，所有等值都应出现
        assert!(lines.iter().all(|l| !l.segments.is_empty()));

        for seg in &lines[4].segments {
            for &(a, e) in seg.iter() {
                let r = crate::kinematics::recoil_energy(a.to_radians(), e, GERMANIUM, NEUTRON);
                assert!((r - 2.0).abs() < 0.05, "point ({}, {}) gives {}", a, e, r);
            }
        }
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(0.1), "0.1");
        assert_eq!(format_level(0.25), "0.25");
        assert_eq!(format_level(2.0), "2");
        assert_eq!(format_level(35.0), "35");
    }
}
