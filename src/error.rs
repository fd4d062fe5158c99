//! # 统一错误处理模块
//!
//! 定义 recoilmap 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// recoilmap 统一错误类型
#[derive(Error, Debug)]
pub enum RecoilError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Unknown nuclide '{0}' (expected one of: electron, deuteron, neutron, he3, iodine, sodium, germanium, xenon)")]
    UnknownNuclide(String),

    // ─────────────────────────────────────────────────────────────
    // 运动学错误（仅 strict 模式）
    // ─────────────────────────────────────────────────────────────
    #[error("Scattering angle {angle_deg:.3}° exceeds the kinematic limit of {max_angle_deg:.3}°")]
    KinematicLimit { angle_deg: f64, max_angle_deg: f64 },

    // ─────────────────────────────────────────────────────────────
    // 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, RecoilError>;
