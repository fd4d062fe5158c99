//! # 公共 CLI 参数
//!
//! 靶核/入射粒子选择、网格求值策略、图像输出参数，以及参数解析函数。
//!
//! ## 依赖关系
//! - 被 `cli/` 下其他子模块使用
//! - 使用 `kinematics/masses.rs` 的 Nuclide

use crate::kinematics::{EvalStrategy, Nuclide};

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────
// 靶核与入射粒子
// ─────────────────────────────────────────────────────────────

/// 网格求值方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Flattened parallel evaluation over the whole grid
    #[default]
    Vectorized,
    /// Explicit nested loops (energy rows, angle columns)
    Nested,
}

impl From<EvalMode> for EvalStrategy {
    fn from(mode: EvalMode) -> Self {
        match mode {
            EvalMode::Vectorized => EvalStrategy::Vectorized,
            EvalMode::Nested => EvalStrategy::Nested,
        }
    }
}

/// 运动学参数
#[derive(Args, Debug, Clone)]
pub struct KinematicsArgs {
    /// Target nuclide (name or abbreviation: e, d, n, he3, i, na, ge, xe)
    #[arg(short, long, default_value = "germanium", value_parser = parse_nuclide)]
    pub target: Nuclide,

    /// Incident particle
    #[arg(long, default_value = "neutron", value_parser = parse_nuclide)]
    pub projectile: Nuclide,

    /// Fail on angles beyond the kinematic limit instead of producing NaN
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Grid evaluation strategy
    #[arg(long = "eval", value_enum, default_value = "vectorized")]
    pub eval: EvalMode,
}

// ─────────────────────────────────────────────────────────────
// 图像输出
// ─────────────────────────────────────────────────────────────

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file (angle, energy, recoil)
    Csv,
    /// XY data file (tab separated with comment header)
    Xy,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
            OutputFormat::Xy => "xy",
        }
    }
}

/// 从文件扩展名推断输出格式
pub fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => OutputFormat::Svg,
        Some("csv") => OutputFormat::Csv,
        Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
        _ => OutputFormat::Png,
    }
}

/// 单张图的输出参数
#[derive(Args, Debug, Clone)]
pub struct FigureArgs {
    /// Output file (default: <figure>_<target abbreviation>.<format>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,
}

impl FigureArgs {
    /// 确定输出路径和格式
    pub fn resolve(&self, stem: &str) -> (PathBuf, OutputFormat) {
        match (&self.output, self.format) {
            (Some(path), format) => {
                let format = format.unwrap_or_else(|| guess_format_from_extension(path));
                // 不支持 PDF 后端，按实际格式改写扩展名
                let path = if is_pdf(path) {
                    path.with_extension(format.extension())
                } else {
                    path.clone()
                };
                (path, format)
            }
            (None, format) => {
                let format = format.unwrap_or(OutputFormat::Png);
                (
                    PathBuf::from(format!("{}.{}", stem, format.extension())),
                    format,
                )
            }
        }
    }
}

/// 扩展名是否为 .pdf
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

// ─────────────────────────────────────────────────────────────
// 参数解析
// ─────────────────────────────────────────────────────────────

/// 闭区间
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// 解析核素
pub fn parse_nuclide(input: &str) -> Result<Nuclide, String> {
    input.parse::<Nuclide>().map_err(|e| e.to_string())
}

/// 范围分隔符的位置：跳过负号和指数中的 `-`
fn range_separator(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let first = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
    (first + 1..bytes.len()).find(|&i| bytes[i] == b'-' && !matches!(bytes[i - 1], b'e' | b'E'))
}

/// 解析 "min-max" 形式的范围（允许负数和科学计数法，如 `-90-90`、`1e-3-5`）
pub fn parse_range(input: &str) -> Result<AxisRange, String> {
    let invalid = || format!("Invalid range '{}'. Expected 'min-max', e.g. '0-180'", input);

    let sep = range_separator(input).ok_or_else(invalid)?;
    let (lo, hi) = (&input[..sep], &input[sep + 1..]);
    let min: f64 = lo.trim().parse().map_err(|_| invalid())?;
    let max: f64 = hi.trim().parse().map_err(|_| invalid())?;

    if !(min.is_finite() && max.is_finite()) || max <= min {
        return Err(format!("Invalid range '{}' (must satisfy min < max)", input));
    }

    Ok(AxisRange { min, max })
}

/// 解析有限实数（入射能量）
pub fn parse_finite(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("'{}' is not a finite number", input)),
    }
}

/// 解析正数（等值线、放大角度）
pub fn parse_positive(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(format!("'{}' is not a positive number", input)),
    }
}
