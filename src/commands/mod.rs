//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `kinematics/`, `plot/`, `export.rs`, `utils/`
//! - 子模块: calc, masses, lines, heatmap, contour, all, figures

pub mod all;
pub mod calc;
pub mod contour;
pub mod figures;
pub mod heatmap;
pub mod lines;
pub mod masses;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Calc(args) => calc::execute(args),
        Commands::Masses => masses::execute(),
        Commands::Lines(args) => lines::execute(args),
        Commands::Heatmap(args) => heatmap::execute(args),
        Commands::Contour(args) => contour::execute(args),
        Commands::All(args) => all::execute(args),
    }
}
