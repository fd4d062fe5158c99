//! # contour 命令实现
//!
//! 输出反冲能等值线图。`--zoom` 使用 0-120° × 50-200 keV 的细分等值预设。
//!
//! ## 依赖关系
//! - 使用 `cli/figure.rs` 定义的 ContourArgs
//! - 使用 `commands/figures.rs` 的计算与输出函数
//! - 使用 `plot/contour.rs` 的默认等值

use super::figures::{self, FigureKind, GridSpec, Setup};
use super::heatmap::{grid_size, print_grid_info};
use crate::cli::figure::ContourArgs;
use crate::error::Result;
use crate::plot::contour::{format_level, DEFAULT_LEVELS, ZOOM_LEVELS};
use crate::utils::output;

/// 执行 contour 命令
pub fn execute(args: ContourArgs) -> Result<()> {
    output::print_header("Recoil Energy Contours");

    let setup = Setup::from(&args.kinematics);
    let (kind, preset, preset_levels) = if args.zoom {
        (FigureKind::ContourZoom, GridSpec::zoom(), &ZOOM_LEVELS[..])
    } else {
        (FigureKind::Contour, GridSpec::full(), &DEFAULT_LEVELS[..])
    };
    let spec = preset.with_overrides(&args.grid);
    let levels: Vec<f64> = args
        .levels
        .clone()
        .unwrap_or_else(|| preset_levels.to_vec());

    let (path, format) = args.figure.resolve(&kind.file_stem(setup.target));

    print_grid_info(&setup, &spec);
    output::print_info(&format!(
        "Levels (keVnr): {}",
        levels
            .iter()
            .map(|l| format_level(*l))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let grid = figures::build_grid(&setup, &spec)?;
    output::print_recoil_range(grid.finite_range());
    output::print_forbidden(figures::count_forbidden(&grid), grid_size(&spec));

    if let Some((lo, hi)) = grid.finite_range() {
        let outside: Vec<String> = levels
            .iter()
            .filter(|l| **l < lo || **l > hi)
            .map(|l| format_level(*l))
            .collect();
        if !outside.is_empty() {
            output::print_skip(&format!(
                "Levels outside the computed range ({:.3} - {:.3} keVnr): {}",
                lo,
                hi,
                outside.join(", ")
            ));
        }
    }

    let opts = figures::figure_options(&args.figure, kind, &setup, format);
    figures::write_contour(&setup, &grid, &levels, &path, format, &opts)?;

    output::print_saved("contour map", &path.display().to_string());
    Ok(())
}
