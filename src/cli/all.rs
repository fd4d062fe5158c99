//! # all 子命令 CLI 定义
//!
//! 为一个或多个靶核批量生成整套图表（曲线、热图、等值线、放大等值线）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/all.rs`

use super::common::{parse_nuclide, EvalMode, OutputFormat};
use crate::kinematics::Nuclide;

use clap::Args;
use std::path::PathBuf;

/// all 子命令参数
#[derive(Args, Debug)]
pub struct AllArgs {
    /// Target nuclides, comma separated, or 'all'
    #[arg(long, default_value = "germanium")]
    pub targets: String,

    /// Incident particle
    #[arg(long, default_value = "neutron", value_parser = parse_nuclide)]
    pub projectile: Nuclide,

    /// Output directory
    #[arg(short, long, env = "RECOILMAP_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format for every figure
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: OutputFormat,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Fail on angles beyond the kinematic limit instead of producing NaN
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Grid evaluation strategy
    #[arg(long = "eval", value_enum, default_value = "vectorized")]
    pub eval: EvalMode,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// 解析靶核列表（逗号分隔，或 `all`）
pub fn parse_targets(input: &str) -> Result<Vec<Nuclide>, String> {
    if input.trim().eq_ignore_ascii_case("all") {
        return Ok(Nuclide::all().to_vec());
    }

    let mut targets = Vec::new();
    for part in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let nuclide = parse_nuclide(part)?;
        if !targets.contains(&nuclide) {
            targets.push(nuclide);
        }
    }

    if targets.is_empty() {
        return Err("No target nuclides given".to_string());
    }
    Ok(targets)
}
