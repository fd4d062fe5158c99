//! # Viridis 色图
//!
//! 将 [0, 1] 的归一化数值映射为颜色，用于热图和等值线。
//!
//! ## 依赖关系
//! - 被 `plot/heatmap.rs` 和 `plot/contour.rs` 使用
//! - 使用 `plotters` 的 `RGBColor`

use plotters::style::RGBColor;

/// viridis 锚点（均匀分布于 [0, 1]）
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// 取归一化位置 t 处的颜色，t 超出 [0, 1] 时截断
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;

    let (r0, g0, b0) = VIRIDIS[lo];
    let (r1, g1, b1) = VIRIDIS[lo + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// 把数值按 [min, max] 线性归一化后取色
pub fn viridis_scaled(value: f64, min: f64, max: f64) -> RGBColor {
    let span = max - min;
    if span <= 0.0 {
        return viridis(0.5);
    }
    viridis((value - min) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn test_midpoint_and_scaling() {
        assert_eq!(viridis(0.5), RGBColor(33, 144, 141));
        assert_eq!(viridis_scaled(15.0, 10.0, 20.0), viridis(0.5));
        assert_eq!(viridis_scaled(1.0, 2.0, 2.0), viridis(0.5));
    }
}
