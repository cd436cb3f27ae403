//! # 数据模型模块
//!
//! 定义投影表、插值结果和网格数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `interp/`, `export/` 和 `commands/` 使用
//! - 子模块: window, projection, grid

pub mod grid;
pub mod projection;
pub mod window;

pub use grid::GridCube;
pub use projection::{DensifiedRow, DensifiedTable, ProjectionRow, ProjectionTable};
pub use window::YearWindow;
