//! # heatmap 命令实现
//!
//! 在角度 × 入射能量网格上计算反冲能并输出热图或数据。
//!
//! ## 依赖关系
//! - 使用 `cli/figure.rs` 定义的 HeatmapArgs
//! - 使用 `commands/figures.rs` 的计算与输出函数

use super::figures::{self, FigureKind, GridSpec, Setup};
use crate::cli::figure::HeatmapArgs;
use crate::error::Result;
use crate::utils::output;

/// 执行 heatmap 命令
pub fn execute(args: HeatmapArgs) -> Result<()> {
    output::print_header("Recoil Energy Heatmap");

    let setup = Setup::from(&args.kinematics);
    let spec = GridSpec::full().with_overrides(&args.grid);
    let (path, format) = args
        .figure
        .resolve(&FigureKind::Heatmap.file_stem(setup.target));

    print_grid_info(&setup, &spec);

    let grid = figures::build_grid(&setup, &spec)?;
    output::print_recoil_range(grid.finite_range());
    output::print_forbidden(figures::count_forbidden(&grid), grid_size(&spec));

    let opts = figures::figure_options(&args.figure, FigureKind::Heatmap, &setup, format);
    figures::write_heatmap(&setup, &grid, &path, format, &opts)?;

    output::print_saved("heatmap", &path.display().to_string());
    Ok(())
}

pub(crate) fn grid_size(spec: &GridSpec) -> usize {
    spec.angle_points * spec.energy_points
}

/// 打印网格信息
pub(crate) fn print_grid_info(setup: &Setup, spec: &GridSpec) {
    output::print_info(&format!(
        "Target: {}, projectile: {}",
        setup.target, setup.projectile
    ));
    output::print_info(&format!(
        "Grid: {:.1}° - {:.1}° ({} points) x {:.1} - {:.1} keV ({} points), {:?} evaluation",
        spec.angles.min,
        spec.angles.max,
        spec.angle_points,
        spec.energies.min,
        spec.energies.max,
        spec.energy_points,
        setup.strategy
    ));
}
