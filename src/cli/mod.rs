//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calc`: 单点反冲能计算
//! - `masses`: 打印质量常数表
//! - `lines`: 反冲能-散射角曲线
//! - `heatmap`: 角度 × 能量热图
//! - `contour`: 等值线图（含 `--zoom` 放大版）
//! - `all`: 批量生成整套图表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, calc, figure, all

pub mod all;
pub mod calc;
pub mod common;
pub mod figure;

use clap::{Parser, Subcommand};

/// recoilmap - 弹性中子-核散射反冲能计算与绘图
#[derive(Parser)]
#[command(name = "recoilmap")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Elastic neutron-nucleus recoil kinematics calculator and plotter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the recoil energy for a single angle and incident energy
    Calc(calc::CalcArgs),

    /// Print the table of rest masses (keV/c^2)
    Masses,

    /// Plot recoil energy vs. scattering angle for several incident energies
    Lines(figure::LinesArgs),

    /// Plot a heatmap of recoil energy over angle x incident energy
    Heatmap(figure::HeatmapArgs),

    /// Plot recoil energy contours over angle x incident energy
    Contour(figure::ContourArgs),

    /// Render the complete figure set for one or more targets
    All(all::AllArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_values_on_command_line() {
        let cli = Cli::try_parse_from([
            "recoilmap",
            "lines",
            "--angles",
            "-90-90",
            "--energies",
            "-70,0,200",
        ])
        .unwrap();
        match cli.command {
            Commands::Lines(args) => {
                assert_eq!(args.angles.min, -90.0);
                assert_eq!(args.energies, vec![-70.0, 0.0, 200.0]);
            }
            _ => panic!("expected lines command"),
        }

        let cli = Cli::try_parse_from(["recoilmap", "calc", "--angle", "30", "--energy", "0"]).unwrap();
        assert!(matches!(cli.command, Commands::Calc(ref args) if args.energy == 0.0));

        assert!(Cli::try_parse_from(["recoilmap", "lines", "--zoom-max", "0"]).is_err());
    }
}
