//! # all 命令实现
//!
//! 为每个靶核生成整套图表：曲线图、热图、等值线图、放大等值线图。
//! 各任务相互独立，用 `BatchRunner` 并行执行。
//!
//! ## 输出文件
//! `lines_<abbr>`, `heatmap_<abbr>`, `kinematics_<abbr>`, `kinematics-zoom_<abbr>`
//!
//! ## 依赖关系
//! - 使用 `cli/all.rs` 定义的 AllArgs
//! - 使用 `batch/` 模块并行处理
//! - 使用 `commands/figures.rs` 的计算与输出函数

use super::figures::{self, FigureKind, GridSpec, Setup};
use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::all::{parse_targets, AllArgs};
use crate::cli::common::{AxisRange, OutputFormat};
use crate::error::{RecoilError, Result};
use crate::kinematics::Nuclide;
use crate::plot::contour::{DEFAULT_LEVELS, ZOOM_LEVELS};
use crate::plot::FigureOptions;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 曲线图使用的入射能量 (keV)
const LINE_ENERGIES: [f64; 4] = [70.0, 200.0, 400.0, 580.0];
/// 曲线图角度采样点数
const LINE_POINTS: usize = 180;
/// 曲线图下栏最大角度（度）
const LINE_ZOOM_MAX: f64 = 30.0;

/// 单个渲染任务
struct RenderTask {
    target: Nuclide,
    kind: FigureKind,
}

/// 所有任务共享的配置
struct RenderConfig {
    projectile: Nuclide,
    output_dir: PathBuf,
    format: OutputFormat,
    width: u32,
    height: u32,
    strict: bool,
    strategy: crate::kinematics::EvalStrategy,
    overwrite: bool,
}

/// 执行 all 命令
pub fn execute(args: AllArgs) -> Result<()> {
    output::print_header("Recoil Kinematics Figure Set");

    let targets = parse_targets(&args.targets).map_err(RecoilError::InvalidArgument)?;
    output::print_info(&format!(
        "Targets: {}",
        targets
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    fs::create_dir_all(&args.output_dir).map_err(|e| RecoilError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;
    output::print_info(&format!(
        "Output directory: '{}' ({})",
        args.output_dir.display(),
        args.format.extension()
    ));

    let config = RenderConfig {
        projectile: args.projectile,
        output_dir: args.output_dir.clone(),
        format: args.format,
        width: args.width,
        height: args.height,
        strict: args.strict,
        strategy: args.eval.into(),
        overwrite: args.overwrite,
    };

    let tasks: Vec<RenderTask> = targets
        .iter()
        .flat_map(|&target| {
            FigureKind::all()
                .into_iter()
                .map(move |kind| RenderTask { target, kind })
        })
        .collect();

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Rendering {} figures with {} parallel jobs",
        tasks.len(),
        runner.jobs()
    ));
    let (result, details) = runner.run(&tasks, |task| process_task(task, &config))?;

    for detail in &details {
        match detail {
            ProcessResult::Success(path) => output::print_saved("figure", path),
            ProcessResult::Skipped(msg) => output::print_skip(msg),
            ProcessResult::Failed(_, _) => {}
        }
    }

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} figures, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed figures:");
        for (name, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", name, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 输出文件路径
fn output_path(dir: &Path, task: &RenderTask, format: OutputFormat) -> PathBuf {
    dir.join(format!(
        "{}.{}",
        task.kind.file_stem(task.target),
        format.extension()
    ))
}

/// 处理单个任务
fn process_task(task: &RenderTask, config: &RenderConfig) -> ProcessResult {
    let path = output_path(&config.output_dir, task, config.format);

    if path.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!("Output exists, skipping: {}", path.display()));
    }

    match render(task, config, &path) {
        Ok(()) => ProcessResult::Success(path.display().to_string()),
        Err(e) => ProcessResult::Failed(task.kind.file_stem(task.target), e.to_string()),
    }
}

fn render(task: &RenderTask, config: &RenderConfig, path: &Path) -> Result<()> {
    let setup = Setup {
        target: task.target,
        projectile: config.projectile,
        strict: config.strict,
        strategy: config.strategy,
    };
    let opts = FigureOptions {
        title: task.kind.default_title(setup.target, setup.projectile),
        width: config.width,
        height: config.height,
        use_svg: config.format == OutputFormat::Svg,
    };

    match task.kind {
        FigureKind::Lines => {
            let angles = AxisRange {
                min: 0.0,
                max: 180.0,
            };
            let curves = figures::build_curves(&setup, &LINE_ENERGIES, angles, LINE_POINTS)?;
            figures::write_lines(&setup, &curves, LINE_ZOOM_MAX, path, config.format, &opts)
        }
        FigureKind::Heatmap => {
            let grid = figures::build_grid(&setup, &GridSpec::full())?;
            figures::write_heatmap(&setup, &grid, path, config.format, &opts)
        }
        FigureKind::Contour => {
            let grid = figures::build_grid(&setup, &GridSpec::full())?;
            figures::write_contour(&setup, &grid, &DEFAULT_LEVELS, path, config.format, &opts)
        }
        FigureKind::ContourZoom => {
            let grid = figures::build_grid(&setup, &GridSpec::zoom())?;
            figures::write_contour(&setup, &grid, &ZOOM_LEVELS, path, config.format, &opts)
        }
    }
}
