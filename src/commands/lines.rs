//! # lines 命令实现
//!
//! 计算若干入射能量下反冲能随散射角的变化，输出两栏曲线图或数据。
//!
//! ## 依赖关系
//! - 使用 `cli/figure.rs` 定义的 LinesArgs
//! - 使用 `commands/figures.rs` 的计算与输出函数

use super::figures::{self, FigureKind, Setup};
use crate::cli::figure::LinesArgs;
use crate::error::{RecoilError, Result};
use crate::utils::output;

/// 执行 lines 命令
pub fn execute(args: LinesArgs) -> Result<()> {
    output::print_header("Recoil Energy vs. Scattering Angle");

    let setup = Setup::from(&args.kinematics);
    let (path, format) = args
        .figure
        .resolve(&FigureKind::Lines.file_stem(setup.target));

    output::print_info(&format!(
        "Target: {}, projectile: {}",
        setup.target, setup.projectile
    ));
    output::print_info(&format!(
        "Angles: {:.1}° - {:.1}° ({} points), zoom panel up to {:.1}°",
        args.angles.min, args.angles.max, args.points, args.zoom_max
    ));

    if args.zoom_max <= args.angles.min {
        return Err(RecoilError::InvalidRange(format!(
            "zoom panel limit {}° must exceed the lowest angle {}°",
            args.zoom_max, args.angles.min
        )));
    }

    let curves = figures::build_curves(&setup, &args.energies, args.angles, args.points)?;

    output::print_forbidden(
        figures::count_forbidden_curves(&curves),
        curves.len() * args.points,
    );

    let opts = figures::figure_options(&args.figure, FigureKind::Lines, &setup, format);
    figures::write_lines(&setup, &curves, args.zoom_max, &path, format, &opts)?;

    output::print_saved(&format!("{} curves", curves.len()), &path.display().to_string());
    Ok(())
}
