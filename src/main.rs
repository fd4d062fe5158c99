//! # recoilmap - 弹性中子-核散射反冲能计算与绘图
//!
//! 给定入射中子能量和散射角，计算靶核反冲能，并在角度/能量范围上
//! 绘制曲线图、热图和等值线图。
//!
//! ## 子命令
//! - `calc`    - 单点反冲能
//! - `masses`  - 质量常数表
//! - `lines`   - 反冲能-散射角曲线
//! - `heatmap` - 角度 × 能量热图
//! - `contour` - 等值线图（`--zoom` 放大版）
//! - `all`     - 批量生成整套图表
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── kinematics/ (质量常数、反冲能公式、网格求值)
//!   │     ├── plot/       (图表渲染)
//!   │     ├── export.rs   (数据导出)
//!   │     └── batch/      (并行批处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod export;
mod kinematics;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
