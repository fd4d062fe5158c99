//! # 图表子命令 CLI 定义
//!
//! `lines`, `heatmap`, `contour` 三个绘图子命令的参数。
//! 默认值与原始分析图一致。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/lines.rs`, `commands/heatmap.rs`, `commands/contour.rs`

use super::common::{
    parse_finite, parse_positive, parse_range, AxisRange, FigureArgs, KinematicsArgs,
};
use clap::Args;

// ─────────────────────────────────────────────────────────────
// lines
// ─────────────────────────────────────────────────────────────

/// lines 子命令参数
#[derive(Args, Debug)]
pub struct LinesArgs {
    /// Incident energies in keV, one curve each
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "70,200,400,580",
        allow_hyphen_values = true,
        value_parser = parse_finite
    )]
    pub energies: Vec<f64>,

    /// Scattering angle range in degrees
    #[arg(long, default_value = "0-180", allow_hyphen_values = true, value_parser = parse_range)]
    pub angles: AxisRange,

    /// Number of angle samples
    #[arg(long, default_value_t = 180)]
    pub points: usize,

    /// Upper angle of the zoomed lower panel (degrees)
    #[arg(long, default_value_t = 30.0, value_parser = parse_positive)]
    pub zoom_max: f64,

    #[command(flatten)]
    pub kinematics: KinematicsArgs,

    #[command(flatten)]
    pub figure: FigureArgs,
}

// ─────────────────────────────────────────────────────────────
// heatmap
// ─────────────────────────────────────────────────────────────

/// 网格范围参数
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Scattering angle range in degrees
    #[arg(long, allow_hyphen_values = true, value_parser = parse_range)]
    pub angles: Option<AxisRange>,

    /// Number of angle samples
    #[arg(long)]
    pub angle_points: Option<usize>,

    /// Incident energy range in keV
    #[arg(long, allow_hyphen_values = true, value_parser = parse_range)]
    pub energies: Option<AxisRange>,

    /// Number of incident energy samples
    #[arg(long)]
    pub energy_points: Option<usize>,
}

/// heatmap 子命令参数
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub kinematics: KinematicsArgs,

    #[command(flatten)]
    pub figure: FigureArgs,
}

// ─────────────────────────────────────────────────────────────
// contour
// ─────────────────────────────────────────────────────────────

/// contour 子命令参数
#[derive(Args, Debug)]
pub struct ContourArgs {
    /// Use the zoomed preset (0-120 deg x 50-200 keV, fine levels)
    #[arg(long, default_value_t = false)]
    pub zoom: bool,

    /// Contour levels in keV (overrides the preset)
    #[arg(long, value_delimiter = ',', value_parser = parse_positive)]
    pub levels: Option<Vec<f64>>,

    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub kinematics: KinematicsArgs,

    #[command(flatten)]
    pub figure: FigureArgs,
}
