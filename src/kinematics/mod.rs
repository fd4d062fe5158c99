//! # 运动学计算模块
//!
//! 弹性中子-核散射的反冲能计算核心。
//!
//! ## 子模块
//! - `masses`: 静止质量常数表
//! - `recoil`: 反冲能公式
//! - `grid`: 一维/二维网格求值
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 不依赖 `plot/`，绘图层只消费这里产生的数组

pub mod grid;
pub mod masses;
pub mod recoil;

pub use grid::{linspace, recoil_curve, EvalStrategy, MeshGrid, RecoilCurve, RecoilGrid};
pub use masses::Nuclide;
pub use recoil::{checked_recoil_energy, max_scatter_angle, recoil_energy};
