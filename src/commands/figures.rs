//! # 图表任务公共逻辑
//!
//! 计算曲线/网格并按输出格式写出图像或数据文件。`lines`、`heatmap`、
//! `contour` 和 `all` 命令共用这里的函数。
//!
//! ## 依赖关系
//! - 被 `commands/` 下各子命令调用
//! - 使用 `kinematics/` 计算，`plot/` 绘图，`export.rs` 导出数据

use crate::cli::common::{AxisRange, FigureArgs, KinematicsArgs, OutputFormat};
use crate::cli::figure::GridArgs;
use crate::error::{RecoilError, Result};
use crate::export;
use crate::kinematics::grid::checked_recoil_curve;
use crate::kinematics::{
    linspace, recoil_curve, EvalStrategy, MeshGrid, Nuclide, RecoilCurve, RecoilGrid,
};
use crate::plot::{self, FigureOptions};

use std::path::Path;

/// 图表种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    Lines,
    Heatmap,
    Contour,
    ContourZoom,
}

impl FigureKind {
    pub fn all() -> [FigureKind; 4] {
        [
            FigureKind::Lines,
            FigureKind::Heatmap,
            FigureKind::Contour,
            FigureKind::ContourZoom,
        ]
    }

    /// 输出文件名（不含扩展名）
    pub fn file_stem(self, target: Nuclide) -> String {
        let prefix = match self {
            FigureKind::Lines => "lines",
            FigureKind::Heatmap => "heatmap",
            FigureKind::Contour => "kinematics",
            FigureKind::ContourZoom => "kinematics-zoom",
        };
        format!("{}_{}", prefix, target.abbreviation())
    }

    /// 默认标题
    pub fn default_title(self, target: Nuclide, projectile: Nuclide) -> String {
        let base = format!("Elastic {} scattering on {}", projectile, target);
        match self {
            FigureKind::ContourZoom => format!("{} (zoom)", base),
            _ => base,
        }
    }
}

/// 运动学设置
#[derive(Debug, Clone, Copy)]
pub struct Setup {
    pub target: Nuclide,
    pub projectile: Nuclide,
    pub strict: bool,
    pub strategy: EvalStrategy,
}

impl From<&KinematicsArgs> for Setup {
    fn from(args: &KinematicsArgs) -> Self {
        Setup {
            target: args.target,
            projectile: args.projectile,
            strict: args.strict,
            strategy: args.eval.into(),
        }
    }
}

/// 由命令行参数构造图像参数
pub fn figure_options(
    args: &FigureArgs,
    kind: FigureKind,
    setup: &Setup,
    format: OutputFormat,
) -> FigureOptions {
    FigureOptions {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| kind.default_title(setup.target, setup.projectile)),
        width: args.width,
        height: args.height,
        use_svg: format == OutputFormat::Svg,
    }
}

/// 网格范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub angles: AxisRange,
    pub angle_points: usize,
    pub energies: AxisRange,
    pub energy_points: usize,
}

impl GridSpec {
    /// 全范围：0-180° (180 点) × 50-700 keV (65 点)
    pub fn full() -> Self {
        Self {
            angles: AxisRange {
                min: 0.0,
                max: 180.0,
            },
            angle_points: 180,
            energies: AxisRange {
                min: 50.0,
                max: 700.0,
            },
            energy_points: 65,
        }
    }

    /// 放大范围：0-120° (120 点) × 50-200 keV (10 点)
    pub fn zoom() -> Self {
        Self {
            angles: AxisRange {
                min: 0.0,
                max: 120.0,
            },
            angle_points: 120,
            energies: AxisRange {
                min: 50.0,
                max: 200.0,
            },
            energy_points: 10,
        }
    }

    /// 用命令行参数覆盖预设
    pub fn with_overrides(mut self, args: &GridArgs) -> Self {
        if let Some(r) = args.angles {
            self.angles = r;
        }
        if let Some(n) = args.angle_points {
            self.angle_points = n;
        }
        if let Some(r) = args.energies {
            self.energies = r;
        }
        if let Some(n) = args.energy_points {
            self.energy_points = n;
        }
        self
    }

    pub fn mesh(&self) -> Result<MeshGrid> {
        if self.angle_points < 2 || self.energy_points < 2 {
            return Err(RecoilError::InvalidRange(format!(
                "grid needs at least 2 points per axis (got {} x {})",
                self.angle_points, self.energy_points
            )));
        }
        Ok(MeshGrid::new(
            linspace(self.angles.min, self.angles.max, self.angle_points),
            linspace(self.energies.min, self.energies.max, self.energy_points),
        ))
    }
}

/// 计算多条反冲能曲线
pub fn build_curves(
    setup: &Setup,
    energies: &[f64],
    angles: AxisRange,
    points: usize,
) -> Result<Vec<RecoilCurve>> {
    if points < 2 {
        return Err(RecoilError::InvalidRange(format!(
            "need at least 2 angle samples (got {})",
            points
        )));
    }
    if energies.is_empty() {
        return Err(RecoilError::InvalidRange(
            "no incident energies given".to_string(),
        ));
    }

    let angles = linspace(angles.min, angles.max, points);
    let (m_t, m_i) = (setup.target.mass(), setup.projectile.mass());

    energies
        .iter()
        .map(|&e| {
            if setup.strict {
                checked_recoil_curve(e, &angles, m_t, m_i)
            } else {
                Ok(recoil_curve(e, &angles, m_t, m_i))
            }
        })
        .collect()
}

/// 在网格上计算反冲能
pub fn build_grid(setup: &Setup, spec: &GridSpec) -> Result<RecoilGrid> {
    let mesh = spec.mesh()?;
    let (m_t, m_i) = (setup.target.mass(), setup.projectile.mass());
    if setup.strict {
        mesh.check_kinematics(m_t, m_i)?;
    }
    Ok(mesh.evaluate(m_t, m_i, setup.strategy))
}

/// 写出曲线（图像或数据）
pub fn write_lines(
    setup: &Setup,
    curves: &[RecoilCurve],
    zoom_max_deg: f64,
    path: &Path,
    format: OutputFormat,
    opts: &FigureOptions,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            plot::lines::generate_lines_plot(curves, zoom_max_deg, path, opts)
        }
        OutputFormat::Csv => export::to_csv(&export::curve_rows(curves), path),
        OutputFormat::Xy => export::to_xy(
            &export::curve_rows(curves),
            setup.target,
            setup.projectile,
            path,
        ),
    }
}

/// 写出热图（图像或数据）
pub fn write_heatmap(
    setup: &Setup,
    grid: &RecoilGrid,
    path: &Path,
    format: OutputFormat,
    opts: &FigureOptions,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => plot::heatmap::generate_heatmap(grid, path, opts),
        _ => write_grid_data(setup, grid, path, format),
    }
}

/// 写出等值线图（图像或数据）
pub fn write_contour(
    setup: &Setup,
    grid: &RecoilGrid,
    levels: &[f64],
    path: &Path,
    format: OutputFormat,
    opts: &FigureOptions,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            plot::contour::generate_contour_plot(grid, levels, path, opts)
        }
        _ => write_grid_data(setup, grid, path, format),
    }
}

fn write_grid_data(
    setup: &Setup,
    grid: &RecoilGrid,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let rows = export::grid_rows(grid);
    match format {
        OutputFormat::Xy => export::to_xy(&rows, setup.target, setup.projectile, path),
        _ => export::to_csv(&rows, path),
    }
}

/// 网格中越界（NaN）点的数量
pub fn count_forbidden(grid: &RecoilGrid) -> usize {
    grid.values.iter().flatten().filter(|v| v.is_nan()).count()
}

/// 曲线中越界（NaN）点的数量
pub fn count_forbidden_curves(curves: &[RecoilCurve]) -> usize {
    curves
        .iter()
        .flat_map(|c| c.points.iter())
        .filter(|(_, e)| e.is_nan())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(target: Nuclide, strict: bool) -> Setup {
        Setup {
            target,
            projectile: Nuclide::Neutron,
            strict,
            strategy: EvalStrategy::Vectorized,
        }
    }

    #[test]
    fn test_file_stems() {
        assert_eq!(FigureKind::Contour.file_stem(Nuclide::Xenon), "kinematics_xe");
        assert_eq!(
            FigureKind::ContourZoom.file_stem(Nuclide::Xenon),
            "kinematics-zoom_xe"
        );
        assert_eq!(FigureKind::Lines.file_stem(Nuclide::Germanium), "lines_ge");
        assert_eq!(FigureKind::Heatmap.file_stem(Nuclide::Sodium), "heatmap_na");
    }

    #[test]
    fn test_grid_presets() {
        let full = build_grid(&setup(Nuclide::Germanium, false), &GridSpec::full()).unwrap();
        assert_eq!(full.mesh.shape(), (65, 180));
        assert_eq!(count_forbidden(&full), 0);

        let zoom = build_grid(&setup(Nuclide::Germanium, false), &GridSpec::zoom()).unwrap();
        assert_eq!(zoom.mesh.shape(), (10, 120));
        assert_eq!(zoom.mesh.angles_deg[119], 120.0);
    }

    #[test]
    fn test_overrides() {
        let args = GridArgs {
            angles: None,
            angle_points: Some(20),
            energies: Some(AxisRange {
                min: 10.0,
                max: 20.0,
            }),
            energy_points: None,
        };
        let spec = GridSpec::full().with_overrides(&args);
        assert_eq!(spec.angle_points, 20);
        assert_eq!(spec.angles, GridSpec::full().angles);
        assert_eq!(spec.energies.max, 20.0);
        assert_eq!(spec.energy_points, 65);
    }

    #[test]
    fn test_strict_mode() {
        let spec = GridSpec::full();
        assert!(build_grid(&setup(Nuclide::Electron, false), &spec).is_ok());
        assert!(matches!(
            build_grid(&setup(Nuclide::Electron, true), &spec),
            Err(RecoilError::KinematicLimit { .. })
        ));

        let range = AxisRange {
            min: 0.0,
            max: 180.0,
        };
        let curves = build_curves(&setup(Nuclide::Electron, false), &[70.0], range, 180).unwrap();
        assert!(count_forbidden_curves(&curves) > 0);
        assert!(build_curves(&setup(Nuclide::Electron, true), &[70.0], range, 180).is_err());
    }

    #[test]
    fn test_invalid_sizes() {
        let mut spec = GridSpec::full();
        spec.energy_points = 1;
        assert!(matches!(
            build_grid(&setup(Nuclide::Germanium, false), &spec),
            Err(RecoilError::InvalidRange(_))
        ));

        let range = GridSpec::full().angles;
        assert!(matches!(
            build_curves(&setup(Nuclide::Germanium, false), &[], range, 10),
            Err(RecoilError::InvalidRange(_))
        ));
        assert!(matches!(
            build_curves(&setup(Nuclide::Germanium, false), &[70.0], range, 1),
            Err(RecoilError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_count_forbidden_whole_grid() {
        let spec = GridSpec::full().with_overrides(&GridArgs {
            angles: Some(AxisRange {
                min: 10.0,
                max: 170.0,
            }),
            angle_points: Some(20),
            energies: None,
            energy_points: Some(5),
        });
        let grid = build_grid(&setup(Nuclide::Electron, false), &spec).unwrap();
        assert_eq!(count_forbidden(&grid), 20 * 5);
        assert!(grid.finite_range().is_none());
    }

    #[test]
    fn test_signed_inputs_evaluate() {
        let range = AxisRange {
            min: -90.0,
            max: 90.0,
        };
        let curves = build_curves(&setup(Nuclide::Germanium, false), &[-70.0, 0.0], range, 3).unwrap();
        assert_eq!(curves[0].points[0].0, -90.0);
        assert!(curves[0].points[0].1 < 0.0);
        assert_eq!(curves[1].points[2].1, 0.0);
        let (lo, hi) = (curves[0].points[0].1, curves[0].points[2].1);
        assert!((lo - hi).abs() <= 1e-12 * lo.abs());
    }
}
