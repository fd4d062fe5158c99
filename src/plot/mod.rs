//! # 图表生成模块
//!
//! 使用 `plotters` 渲染反冲能图表。只消费 `kinematics` 计算好的数组和标签，
//! 不参与任何计算。
//!
//! ## 子模块
//! - `lines`: 反冲能-散射角曲线（全角度 + 小角度放大两栏）
//! - `heatmap`: 角度 × 能量热图（带色标）
//! - `contour`: 等值线提取与等值线图
//! - `colormap`: viridis 色图
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `kinematics/grid.rs` 的 RecoilCurve, RecoilGrid

pub mod colormap;
pub mod contour;
pub mod heatmap;
pub mod lines;

use crate::error::RecoilError;

pub const ANGLE_LABEL: &str = "Scattering angle (degrees)";
pub const ENERGY_LABEL: &str = "Incident neutron energy (keV)";
pub const RECOIL_LABEL: &str = "Recoil energy (keVnr)";

/// 图像参数
#[derive(Debug, Clone)]
pub struct FigureOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

/// plotters 错误统一转换
pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> RecoilError {
    RecoilError::PlotError(format!("{:?}", e))
}

/// 按 NaN/Inf 断开折线，返回连续的有限值片段
pub fn finite_segments(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_segments() {
        let pts = vec![
            (0.0, 1.0),
            (1.0, 2.0),
            (2.0, f64::NAN),
            (3.0, f64::NAN),
            (4.0, 5.0),
            (5.0, f64::INFINITY),
        ];
        let segs = finite_segments(&pts);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(segs[1], vec![(4.0, 5.0)]);

        assert!(finite_segments(&[(0.0, f64::NAN)]).is_empty());
    }
}
