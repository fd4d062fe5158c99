//! # 网格求值
//!
//! 在一维角度范围或二维 (角度 × 入射能量) 网格上逐点计算反冲能。
//!
//! ## 功能
//! - `linspace`: 含端点的等间距采样（与 numpy 一致）
//! - `MeshGrid`: 行 = 入射能量，列 = 散射角
//! - 两种求值策略：rayon 并行（向量化）与嵌套循环，结果逐位相同
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `plot/` 使用
//! - 使用 `kinematics/recoil.rs` 的 `recoil_energy`
//! - 使用 `rayon` 并行计算

use crate::error::Result;
use crate::kinematics::recoil::{checked_recoil_energy, recoil_energy};

use rayon::prelude::*;

/// 网格求值策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalStrategy {
    /// 展平后并行逐元素求值
    #[default]
    Vectorized,
    /// 逐行逐列嵌套循环
    Nested,
}

/// 等间距采样，包含端点
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// 单条反冲能曲线（固定入射能量）
#[derive(Debug, Clone)]
pub struct RecoilCurve {
    /// 入射能量 (keV)
    pub energy_incident: f64,
    /// 图例标签
    pub label: String,
    /// (散射角°, 反冲能 keV)
    pub points: Vec<(f64, f64)>,
}

impl RecoilCurve {
    /// 截取散射角不超过 `max_angle_deg` 的部分
    pub fn truncated(&self, max_angle_deg: f64) -> RecoilCurve {
        RecoilCurve {
            energy_incident: self.energy_incident,
            label: self.label.clone(),
            points: self
                .points
                .iter()
                .copied()
                .filter(|(a, _)| *a <= max_angle_deg)
                .collect(),
        }
    }
}

/// 计算一条反冲能曲线，角度单位为度
pub fn recoil_curve(
    energy_incident: f64,
    angles_deg: &[f64],
    mass_target: f64,
    mass_incident: f64,
) -> RecoilCurve {
    let points = angles_deg
        .iter()
        .map(|&a| {
            (
                a,
                recoil_energy(a.to_radians(), energy_incident, mass_target, mass_incident),
            )
        })
        .collect();

    RecoilCurve {
        energy_incident,
        label: format!("E_n = {} keV", energy_incident),
        points,
    }
}

/// 带运动学检查的曲线计算（strict 模式）
pub fn checked_recoil_curve(
    energy_incident: f64,
    angles_deg: &[f64],
    mass_target: f64,
    mass_incident: f64,
) -> Result<RecoilCurve> {
    let points = angles_deg
        .iter()
        .map(|&a| {
            checked_recoil_energy(a.to_radians(), energy_incident, mass_target, mass_incident)
                .map(|e| (a, e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecoilCurve {
        energy_incident,
        label: format!("E_n = {} keV", energy_incident),
        points,
    })
}

/// 角度 × 入射能量网格
#[derive(Debug, Clone)]
pub struct MeshGrid {
    /// 散射角轴（度）
    pub angles_deg: Vec<f64>,
    /// 入射能量轴（keV）
    pub energies_kev: Vec<f64>,
}

impl MeshGrid {
    pub fn new(angles_deg: Vec<f64>, energies_kev: Vec<f64>) -> Self {
        Self {
            angles_deg,
            energies_kev,
        }
    }

    /// (行数, 列数) = (能量点数, 角度点数)
    pub fn shape(&self) -> (usize, usize) {
        (self.energies_kev.len(), self.angles_deg.len())
    }

    /// 在整个网格上计算反冲能
    pub fn evaluate(
        &self,
        mass_target: f64,
        mass_incident: f64,
        strategy: EvalStrategy,
    ) -> RecoilGrid {
        let values = match strategy {
            EvalStrategy::Vectorized => self.evaluate_vectorized(mass_target, mass_incident),
            EvalStrategy::Nested => self.evaluate_nested(mass_target, mass_incident),
        };

        RecoilGrid {
            mesh: self.clone(),
            values,
        }
    }

    /// 检查网格内所有点是否在运动学允许范围内
    pub fn check_kinematics(&self, mass_target: f64, mass_incident: f64) -> Result<()> {
        for &a in &self.angles_deg {
            checked_recoil_energy(a.to_radians(), 1.0, mass_target, mass_incident)?;
        }
        Ok(())
    }

    fn evaluate_vectorized(&self, mass_target: f64, mass_incident: f64) -> Vec<Vec<f64>> {
        let (rows, cols) = self.shape();
        let flat: Vec<f64> = (0..rows * cols)
            .into_par_iter()
            .map(|idx| {
                let energy = self.energies_kev[idx / cols];
                let angle = self.angles_deg[idx % cols];
                recoil_energy(angle.to_radians(), energy, mass_target, mass_incident)
            })
            .collect();

        if cols == 0 {
            return vec![Vec::new(); rows];
        }
        flat.chunks(cols).map(|row| row.to_vec()).collect()
    }

    fn evaluate_nested(&self, mass_target: f64, mass_incident: f64) -> Vec<Vec<f64>> {
        let mut values = Vec::with_capacity(self.energies_kev.len());
        for &energy in &self.energies_kev {
            let mut row = Vec::with_capacity(self.angles_deg.len());
            for &angle in &self.angles_deg {
                row.push(recoil_energy(
                    angle.to_radians(),
                    energy,
                    mass_target,
                    mass_incident,
                ));
            }
            values.push(row);
        }
        values
    }
}

/// 网格上的反冲能结果
#[derive(Debug, Clone)]
pub struct RecoilGrid {
    pub mesh: MeshGrid,
    /// values[能量下标][角度下标]，单位 keV
    pub values: Vec<Vec<f64>>,
}

impl RecoilGrid {
    /// 有限值的 (最小, 最大)，忽略 NaN/Inf
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// 按行展开为 (散射角°, 入射能量 keV, 反冲能 keV)
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.mesh
            .energies_kev
            .iter()
            .zip(&self.values)
            .flat_map(move |(&energy, row)| {
                self.mesh
                    .angles_deg
                    .iter()
                    .zip(row)
                    .map(move |(&angle, &value)| (angle, energy, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::masses::{ELECTRON, GERMANIUM, NEUTRON, XENON};

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let angles = linspace(0.0, 180.0, 180);
        assert_eq!(angles.len(), 180);
        assert_eq!(angles[0], 0.0);
        assert_eq!(angles[179], 180.0);

        let energies = linspace(50.0, 700.0, 65);
        assert_eq!(energies.len(), 65);
        assert_eq!(energies[64], 700.0);
    }

    #[test]
    fn test_grid_strategies_identical() {
        let mesh = MeshGrid::new(linspace(0.0, 180.0, 180), linspace(50.0, 700.0, 65));
        let vectorized = mesh.evaluate(GERMANIUM, NEUTRON, EvalStrategy::Vectorized);
        let nested = mesh.evaluate(GERMANIUM, NEUTRON, EvalStrategy::Nested);

        assert_eq!(vectorized.values.len(), 65);
        assert!(vectorized.values.iter().all(|row| row.len() == 180));
        for (a, b) in vectorized.values.iter().flatten().zip(nested.values.iter().flatten()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_grid_matches_scalar_calls() {
        let mesh = MeshGrid::new(linspace(0.0, 120.0, 120), linspace(50.0, 200.0, 10));
        let grid = mesh.evaluate(XENON, NEUTRON, EvalStrategy::Vectorized);

        for (i, &energy) in mesh.energies_kev.iter().enumerate() {
            for (j, &angle) in mesh.angles_deg.iter().enumerate() {
                let scalar = recoil_energy(angle.to_radians(), energy, XENON, NEUTRON);
                assert_eq!(grid.values[i][j].to_bits(), scalar.to_bits());
            }
        }
    }

    #[test]
    fn test_nan_cells_are_bit_identical() {
        let mesh = MeshGrid::new(linspace(0.0, 180.0, 37), linspace(10.0, 100.0, 4));
        let vectorized = mesh.evaluate(ELECTRON, NEUTRON, EvalStrategy::Vectorized);
        let nested = mesh.evaluate(ELECTRON, NEUTRON, EvalStrategy::Nested);

        let nan_count = vectorized.values.iter().flatten().filter(|v| v.is_nan()).count();
        assert!(nan_count > 0);
        for (a, b) in vectorized.values.iter().flatten().zip(nested.values.iter().flatten()) {
            assert_eq!(a.is_nan(), b.is_nan());
            if !a.is_nan() {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }

        let (lo, hi) = vectorized.finite_range().unwrap();
        assert!(lo.is_finite() && hi.is_finite() && lo <= hi);
        assert!(mesh.check_kinematics(ELECTRON, NEUTRON).is_err());
        assert!(mesh.check_kinematics(GERMANIUM, NEUTRON).is_ok());
    }

    #[test]
    fn test_recoil_curve_and_truncation() {
        let angles = linspace(0.0, 180.0, 180);
        let curve = recoil_curve(200.0, &angles, GERMANIUM, NEUTRON);
        assert_eq!(curve.label, "E_n = 200 keV");
        assert_eq!(curve.points.len(), 180);
        assert!(curve.points.windows(2).all(|w| w[1].1 >= w[0].1));

        let zoom = curve.truncated(30.0);
        assert!(zoom.points.iter().all(|(a, _)| *a <= 30.0));
        assert_eq!(zoom.points.len(), 30);
    }

    #[test]
    fn test_checked_curve_rejects_forbidden_angles() {
        let angles = linspace(0.0, 90.0, 10);
        assert!(checked_recoil_curve(100.0, &angles, ELECTRON, NEUTRON).is_err());
        assert!(checked_recoil_curve(100.0, &angles, GERMANIUM, NEUTRON).is_ok());
    }

    #[test]
    fn test_samples_row_major() {
        let mesh = MeshGrid::new(vec![0.0, 90.0], vec![100.0, 200.0, 300.0]);
        let grid = mesh.evaluate(GERMANIUM, NEUTRON, EvalStrategy::Nested);
        let samples: Vec<_> = grid.samples().collect();
        assert_eq!(samples.len(), 6);
        assert_eq!((samples[1].0, samples[1].1), (90.0, 100.0));
        assert_eq!((samples[2].0, samples[2].1), (0.0, 200.0));
    }
}
