//! # 弹性散射反冲能计算
//!
//! 非相对论两体弹性散射：给定入射能量和散射角，计算靶核获得的反冲能。
//!
//! ## 公式
//! ```text
//! E_R = 2 E m² / (m + M)² · [ M/m + sin²θ − cos θ · √((M/m)² − sin²θ) ]
//! ```
//! 其中 m 为入射粒子质量，M 为靶核质量，θ 为实验室系散射角。
//!
//! ## 越界行为
//! 当 m > M 且 sin θ > M/m 时根号内为负，结果为 NaN 并原样传播。
//! `checked_recoil_energy` 在这种情况下返回 `KinematicLimit` 错误。
//!
//! ## 依赖关系
//! - 被 `kinematics/grid.rs` 和 `commands/` 调用
//! - 质量取自 `kinematics/masses.rs`，入射粒子默认为中子（见 CLI `--projectile`）

use crate::error::{RecoilError, Result};

use std::f64::consts::PI;

/// 计算反冲能 (keV)
///
/// 角度单位为弧度，质量单位为 keV/c²。不检查输入范围。
pub fn recoil_energy(
    scatter_angle: f64,
    energy_incident: f64,
    mass_target: f64,
    mass_incident: f64,
) -> f64 {
    let leading_coeff =
        2.0 * energy_incident * mass_incident.powi(2) / (mass_incident + mass_target).powi(2);

    let ratio = mass_target / mass_incident;
    let sin = scatter_angle.sin();
    let cos = scatter_angle.cos();
    let bracketed = ratio + sin.powi(2) - cos * (ratio.powi(2) - sin.powi(2)).sqrt();

    leading_coeff * bracketed
}

/// 带运动学检查的反冲能
pub fn checked_recoil_energy(
    scatter_angle: f64,
    energy_incident: f64,
    mass_target: f64,
    mass_incident: f64,
) -> Result<f64> {
    if !is_kinematically_allowed(scatter_angle, mass_target, mass_incident) {
        return Err(RecoilError::KinematicLimit {
            angle_deg: scatter_angle.to_degrees(),
            max_angle_deg: max_scatter_angle(mass_target, mass_incident).to_degrees(),
        });
    }
    Ok(recoil_energy(
        scatter_angle,
        energy_incident,
        mass_target,
        mass_incident,
    ))
}

/// 最大允许散射角（弧度）
///
/// 入射粒子比靶核重时为 asin(M/m)，否则为 π。
pub fn max_scatter_angle(mass_target: f64, mass_incident: f64) -> f64 {
    if mass_target < mass_incident {
        (mass_target / mass_incident).asin()
    } else {
        PI
    }
}

/// 该散射角是否在运动学允许范围内（根号内非负）
pub fn is_kinematically_allowed(scatter_angle: f64, mass_target: f64, mass_incident: f64) -> bool {
    let ratio = mass_target / mass_incident;
    ratio.powi(2) - scatter_angle.sin().powi(2) >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::masses::{DEUTERON, ELECTRON, GERMANIUM, HE3, NEUTRON, XENON};
    use float_cmp::approx_eq;

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        ((a - b) / b).abs() < tol
    }

    /// 系数项 2 E m² / (m + M)² · M/m，零角时被 √ 项完全抵消
    fn ratio_term(e: f64, m_t: f64, m_i: f64) -> f64 {
        2.0 * e * m_i.powi(2) / (m_i + m_t).powi(2) * (m_t / m_i)
    }

    #[test]
    fn test_zero_angle_closed_form() {
        let cases = [
            (200.0, GERMANIUM, NEUTRON),
            (70.0, XENON, NEUTRON),
            (1.5, HE3, NEUTRON),
            (580.0, GERMANIUM, DEUTERON),
            (12345.0, 1.0e3, 2.5e5),
        ];
        for (e, m_t, m_i) in cases {
            let scale = ratio_term(e, m_t, m_i);
            let got = recoil_energy(0.0, e, m_t, m_i);
            assert!(
                got.abs() <= 1e-9 * scale,
                "E={} M={} m={}: {} (scale {})",
                e,
                m_t,
                m_i,
                got,
                scale
            );
        }
    }

    #[test]
    fn test_germanium_zero_angle_scenario() {
        let scale = 2.0 * 200.0 * 939565.0_f64.powi(2) / (939565.0_f64 + 67652000.0).powi(2)
            * (67652000.0 / 939565.0);
        let got = recoil_energy(0.0, 200.0, 67652000.0, 939565.0);
        assert!(got.abs() <= 1e-6 * scale);
        assert_eq!(got, recoil_energy(0.0, 200.0, GERMANIUM, NEUTRON));

        // 90° 时 √ 项消失，括号为 M/m + 1
        let right_angle = recoil_energy(PI / 2.0, 200.0, GERMANIUM, NEUTRON);
        let expected = scale * (1.0 + NEUTRON / GERMANIUM);
        assert!(rel_close(right_angle, expected, 1e-9));
    }

    #[test]
    fn test_backscatter_maximum() {
        // θ = π 时为最大反冲能 4 m M / (m + M)² · E
        let e = 400.0;
        let expected = 4.0 * NEUTRON * GERMANIUM / (NEUTRON + GERMANIUM).powi(2) * e;
        let got = recoil_energy(PI, e, GERMANIUM, NEUTRON);
        assert!(rel_close(got, expected, 1e-9));
    }

    #[test]
    fn test_angle_symmetry() {
        for deg in [5.0_f64, 30.0, 72.5, 120.0, 179.0] {
            let a = deg.to_radians();
            let base = recoil_energy(a, 200.0, GERMANIUM, NEUTRON);
            let neg = recoil_energy(-a, 200.0, GERMANIUM, NEUTRON);
            let wrap = recoil_energy(2.0 * PI - a, 200.0, GERMANIUM, NEUTRON);
            assert!(approx_eq!(f64, base, neg, epsilon = 1e-9));
            assert!(approx_eq!(f64, base, wrap, epsilon = 1e-9));
        }
    }

    #[test]
    fn test_linear_in_incident_energy() {
        for deg in [0.0_f64, 45.0, 90.0, 150.0] {
            let a = deg.to_radians();
            let single = recoil_energy(a, 123.0, XENON, NEUTRON);
            let double = recoil_energy(a, 246.0, XENON, NEUTRON);
            assert!(approx_eq!(f64, double, 2.0 * single, ulps = 4));
        }
    }

    #[test]
    fn test_beyond_kinematic_limit_is_nan() {
        // 中子打电子：M/m ≈ 5.4e-4，接近 90° 时 sin θ 远大于 M/m
        let angle = 1.5;
        assert!(!is_kinematically_allowed(angle, ELECTRON, NEUTRON));
        assert!(recoil_energy(angle, 100.0, ELECTRON, NEUTRON).is_nan());
    }

    #[test]
    fn test_checked_reports_kinematic_limit() {
        let err = checked_recoil_energy(1.5, 100.0, ELECTRON, NEUTRON).unwrap_err();
        match err {
            RecoilError::KinematicLimit {
                angle_deg,
                max_angle_deg,
            } => {
                assert!(approx_eq!(f64, angle_deg, 1.5_f64.to_degrees(), epsilon = 1e-12));
                assert!(max_angle_deg < 0.1);
            }
            other => panic!("unexpected error: {}", other),
        }

        let ok = checked_recoil_energy(0.5, 100.0, GERMANIUM, NEUTRON).unwrap();
        assert_eq!(ok, recoil_energy(0.5, 100.0, GERMANIUM, NEUTRON));
    }

    #[test]
    fn test_max_scatter_angle() {
        assert_eq!(max_scatter_angle(GERMANIUM, NEUTRON), PI);
        let limit = max_scatter_angle(ELECTRON, NEUTRON);
        assert!(approx_eq!(f64, limit.sin(), ELECTRON / NEUTRON, epsilon = 1e-15));
        assert!(is_kinematically_allowed(limit * 0.999, ELECTRON, NEUTRON));
    }

    #[test]
    fn test_recoil_non_negative_in_physical_domain() {
        for i in 1..=180 {
            let a = (i as f64).to_radians();
            let e = recoil_energy(a, 580.0, GERMANIUM, NEUTRON);
            assert!(e >= 0.0, "negative recoil at {}°: {}", i, e);
        }
    }
}
