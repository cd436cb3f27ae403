//! # 插值模块
//!
//! 将十年间隔的投影列加密为逐年列。
//!
//! ## 功能
//! - 识别锚点列前缀与年份 (`p2_1980`, `g2_1990`, ...)
//! - 按窗口筛选锚点
//! - 前向线性插值，末端保持最后一个有效值
//! - 基于 rayon 的逐行并行处理
//!
//! ## 依赖关系
//! - 被 `commands/interpolate.rs`, `commands/run.rs` 使用
//! - 使用 `models/projection.rs`
//! - 子模块: columns, linear

pub mod columns;
pub mod linear;

pub use columns::{decadal_columns, detect_prefix, select_anchors};
pub use linear::{densify, DensifyOptions};
