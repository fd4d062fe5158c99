//! # calc 命令实现
//!
//! 对给定入射能量和一组散射角计算反冲能并打印表格。
//!
//! ## 依赖关系
//! - 使用 `cli/calc.rs` 定义的参数
//! - 使用 `kinematics/recoil.rs`

use crate::cli::calc::CalcArgs;
use crate::error::Result;
use crate::kinematics::{checked_recoil_energy, max_scatter_angle, recoil_energy};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct RecoilRow {
    #[tabled(rename = "θ (°)")]
    angle: String,
    #[tabled(rename = "E_n (keV)")]
    energy: String,
    #[tabled(rename = "E_R (keVnr)")]
    recoil: String,
}

/// 执行 calc 命令
pub fn execute(args: CalcArgs) -> Result<()> {
    output::print_header("Elastic Recoil Energy");

    let target = args.kinematics.target;
    let projectile = args.kinematics.projectile;
    let (m_t, m_i) = (target.mass(), projectile.mass());

    output::print_info(&format!(
        "{} ({:.4e} keV/c²) -> {} ({:.4e} keV/c²)",
        projectile, m_i, target, m_t
    ));

    let limit = max_scatter_angle(m_t, m_i).to_degrees();
    if limit < 180.0 {
        output::print_warning(&format!(
            "Kinematic limit: scattering angles above {:.4}° are forbidden",
            limit
        ));
    }

    let mut rows = Vec::with_capacity(args.angle.len());
    for &angle in &args.angle {
        let theta = angle.to_radians();
        let recoil = if args.kinematics.strict {
            checked_recoil_energy(theta, args.energy, m_t, m_i)?
        } else {
            recoil_energy(theta, args.energy, m_t, m_i)
        };

        rows.push(RecoilRow {
            angle: format!("{:.3}", angle),
            energy: format!("{:.3}", args.energy),
            recoil: format!("{:.6}", recoil),
        });
    }

    println!("{}", Table::new(&rows));
    Ok(())
}
