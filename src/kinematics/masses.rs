//! # 静止质量常数表
//!
//! 提供核素静止质量（keV/c²），用于弹性散射运动学计算。
//!
//! ## 数据
//! 数值为固定常数，必须与历史计算保持逐位一致。
//!
//! ## 依赖关系
//! - 被 `kinematics/recoil.rs` 和 `commands/` 使用
//! - 纯静态数据，无外部依赖

use crate::error::{RecoilError, Result};

use std::fmt;
use std::str::FromStr;

/// 电子质量 (keV/c²)
pub const ELECTRON: f64 = 511.0;
/// 氘核质量 (keV/c²)
pub const DEUTERON: f64 = 1.8756e6;
/// 中子质量 (keV/c²)
pub const NEUTRON: f64 = 939565.0;
/// ³He 质量 (keV/c²)
pub const HE3: f64 = 2.809414e6;
/// 碘质量 (keV/c²)
pub const IODINE: f64 = 118210.76e3;
/// 钠质量 (keV/c²)
pub const SODIUM: f64 = 21414.8342e3;
/// 锗质量 (keV/c²)
pub const GERMANIUM: f64 = 67652e3;
/// 氙质量 (keV/c²)
pub const XENON: f64 = 122299e3;

/// 核素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nuclide {
    Electron,
    Deuteron,
    Neutron,
    Helium3,
    Iodine,
    Sodium,
    Germanium,
    Xenon,
}

impl Nuclide {
    /// 全部核素（固定顺序）
    pub fn all() -> &'static [Nuclide] {
        &[
            Nuclide::Electron,
            Nuclide::Deuteron,
            Nuclide::Neutron,
            Nuclide::Helium3,
            Nuclide::Iodine,
            Nuclide::Sodium,
            Nuclide::Germanium,
            Nuclide::Xenon,
        ]
    }

    /// 静止质量 (keV/c²)
    pub fn mass(self) -> f64 {
        match self {
            Nuclide::Electron => ELECTRON,
            Nuclide::Deuteron => DEUTERON,
            Nuclide::Neutron => NEUTRON,
            Nuclide::Helium3 => HE3,
            Nuclide::Iodine => IODINE,
            Nuclide::Sodium => SODIUM,
            Nuclide::Germanium => GERMANIUM,
            Nuclide::Xenon => XENON,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Nuclide::Electron => "electron",
            Nuclide::Deuteron => "deuteron",
            Nuclide::Neutron => "neutron",
            Nuclide::Helium3 => "he3",
            Nuclide::Iodine => "iodine",
            Nuclide::Sodium => "sodium",
            Nuclide::Germanium => "germanium",
            Nuclide::Xenon => "xenon",
        }
    }

    /// 文件名缩写（如 `kinematics_xe.png`）
    pub fn abbreviation(self) -> &'static str {
        match self {
            Nuclide::Electron => "e",
            Nuclide::Deuteron => "d",
            Nuclide::Neutron => "n",
            Nuclide::Helium3 => "he3",
            Nuclide::Iodine => "i",
            Nuclide::Sodium => "na",
            Nuclide::Germanium => "ge",
            Nuclide::Xenon => "xe",
        }
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Nuclide {
    type Err = RecoilError;

    /// 按名称或缩写解析，不区分大小写
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Nuclide::all()
            .iter()
            .copied()
            .find(|n| n.name() == key || n.abbreviation() == key)
            .or(match key.as_str() {
                "helium3" | "helium-3" | "3he" => Some(Nuclide::Helium3),
                _ => None,
            })
            .ok_or_else(|| RecoilError::UnknownNuclide(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_constants_exact() {
        assert_eq!(Nuclide::Electron.mass(), 511.0);
        assert_eq!(Nuclide::Deuteron.mass(), 1.8756e6);
        assert_eq!(Nuclide::Neutron.mass(), 939565.0);
        assert_eq!(Nuclide::Helium3.mass(), 2.809414e6);
        assert_eq!(Nuclide::Iodine.mass(), 118210.76e3);
        assert_eq!(Nuclide::Sodium.mass(), 21414.8342e3);
        assert_eq!(Nuclide::Germanium.mass(), 67652e3);
        assert_eq!(Nuclide::Xenon.mass(), 122299e3);
    }

    #[test]
    fn test_masses_positive() {
        for n in Nuclide::all() {
            assert!(n.mass() > 0.0, "{} mass must be positive", n);
        }
    }

    #[test]
    fn test_parse_nuclide() {
        assert_eq!("germanium".parse::<Nuclide>().unwrap(), Nuclide::Germanium);
        assert_eq!("Ge".parse::<Nuclide>().unwrap(), Nuclide::Germanium);
        assert_eq!("XE".parse::<Nuclide>().unwrap(), Nuclide::Xenon);
        assert_eq!("helium-3".parse::<Nuclide>().unwrap(), Nuclide::Helium3);
        assert!("argon".parse::<Nuclide>().is_err());
    }

    #[test]
    fn test_names_and_abbreviations_round_trip() {
        for &n in Nuclide::all() {
            assert_eq!(n.name().parse::<Nuclide>().unwrap(), n);
            assert_eq!(n.abbreviation().parse::<Nuclide>().unwrap(), n);
        }
        assert_eq!("xenon".parse::<Nuclide>().unwrap().mass(), XENON);
        assert_eq!("Na".parse::<Nuclide>().unwrap().mass(), SODIUM);
    }
}
