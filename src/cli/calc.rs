//! # calc 子命令 CLI 定义
//!
//! 单点反冲能计算。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calc.rs`

use super::common::{parse_finite, KinematicsArgs};
use clap::Args;

/// calc 子命令参数
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Scattering angle(s) in degrees, comma separated
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub angle: Vec<f64>,

    /// Incident energy in keV
    #[arg(short, long, allow_hyphen_values = true, value_parser = parse_finite)]
    pub energy: f64,

    #[command(flatten)]
    pub kinematics: KinematicsArgs,
}
