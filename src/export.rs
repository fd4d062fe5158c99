//! # 数据导出
//!
//! 将计算好的反冲能数组导出为 CSV 或 XY 文本。
//!
//! ## 支持格式
//! - CSV: `angle_deg,energy_kev,recoil_kev`，每个采样点一行（长表格式）
//! - XY: `#` 注释头 + 制表符分隔的三列
//!
//! 越界（NaN）的点原样写出为 `NaN`。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `kinematics/grid.rs` 的 RecoilCurve, RecoilGrid
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{RecoilError, Result};
use crate::kinematics::{Nuclide, RecoilCurve, RecoilGrid};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 导出的一行数据
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecoilRow {
    pub angle_deg: f64,
    pub energy_kev: f64,
    pub recoil_kev: f64,
}

/// 曲线 → 行
pub fn curve_rows(curves: &[RecoilCurve]) -> Vec<RecoilRow> {
    curves
        .iter()
        .flat_map(|c| {
            c.points.iter().map(move |&(angle_deg, recoil_kev)| RecoilRow {
                angle_deg,
                energy_kev: c.energy_incident,
                recoil_kev,
            })
        })
        .collect()
}

/// 网格 → 行（按能量逐行）
pub fn grid_rows(grid: &RecoilGrid) -> Vec<RecoilRow> {
    grid.samples()
        .map(|(angle_deg, energy_kev, recoil_kev)| RecoilRow {
            angle_deg,
            energy_kev,
            recoil_kev,
        })
        .collect()
}

/// 导出为 CSV
pub fn to_csv(rows: &[RecoilRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| RecoilError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY
pub fn to_xy(
    rows: &[RecoilRow],
    target: Nuclide,
    projectile: Nuclide,
    output_path: &Path,
) -> Result<()> {
    let write_err = |e: std::io::Error| RecoilError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let mut file = BufWriter::new(File::create(output_path).map_err(write_err)?);

    writeln!(
        file,
        "# Elastic recoil kinematics: {} -> {}",
        projectile, target
    )
    .map_err(write_err)?;
    writeln!(
        file,
        "# Masses (keV/c^2): projectile = {}, target = {}",
        projectile.mass(),
        target.mass()
    )
    .map_err(write_err)?;
    writeln!(
        file,
        "# Columns: angle (degrees), incident energy (keV), recoil energy (keVnr)"
    )
    .map_err(write_err)?;
    writeln!(file, "#").map_err(write_err)?;

    for row in rows {
        writeln!(
            file,
            "{:.4}\t{:.4}\t{:.6}",
            row.angle_deg, row.energy_kev, row.recoil_kev
        )
        .map_err(write_err)?;
    }

    file.flush().map_err(write_err)?;

    Ok(())
}
