//! # masses 命令实现
//!
//! 以表格形式打印静止质量常数。
//!
//! ## 依赖关系
//! - 使用 `kinematics/masses.rs`
//! - 使用 `tabled` 输出表格

use crate::error::Result;
use crate::kinematics::Nuclide;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MassRow {
    #[tabled(rename = "Nuclide")]
    name: String,
    #[tabled(rename = "Abbr.")]
    abbreviation: String,
    #[tabled(rename = "Mass (keV/c²)")]
    mass: String,
}

/// 执行 masses 命令
pub fn execute() -> Result<()> {
    output::print_header("Rest Masses");

    let rows: Vec<MassRow> = Nuclide::all()
        .iter()
        .map(|n| MassRow {
            name: n.name().to_string(),
            abbreviation: n.abbreviation().to_string(),
            mass: format!("{:.4}", n.mass()),
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}
