//! # 解析器模块
//!
//! 提供 SSP 投影 CSV 与 NetCDF 网格的读取。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: projection, grid, time_axis

pub mod grid;
pub mod projection;
pub mod time_axis;

pub use grid::{read_grid, GridRequest};
pub use projection::parse_projection_file;
