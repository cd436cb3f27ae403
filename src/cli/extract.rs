//! # extract 子命令 CLI 定义
//!
//! 从 NetCDF 文件提取 `(time, lat, lon)` 变量并融化为 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use super::WindowArgs;
use crate::export::grid::GridLayout;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出布局
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Layout {
    /// One row per cell, one column per year
    #[default]
    Wide,
    /// One row per cell and year (lat, lon, year, value)
    Long,
}

impl From<Layout> for GridLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Wide => GridLayout::Wide,
            Layout::Long => GridLayout::Long,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Wide => write!(f, "wide"),
            Layout::Long => write!(f, "long"),
        }
    }
}

/// 网格变量选项（extract 与 run 共用）
#[derive(Args, Debug, Clone)]
pub struct GridVarArgs {
    /// Gridded variable to extract
    #[arg(long, default_value = "pdomww")]
    pub variable: String,

    /// Latitude coordinate variable
    #[arg(long, default_value = "lat")]
    pub lat_var: String,

    /// Longitude coordinate variable
    #[arg(long, default_value = "lon")]
    pub lon_var: String,

    /// Time coordinate variable
    #[arg(long, default_value = "time")]
    pub time_var: String,

    /// Year of time index 0 when the time variable has no usable units
    #[arg(long, default_value_t = 1901)]
    pub first_year: i32,

    /// Drop cells that are missing in every selected year
    #[arg(long, default_value_t = false)]
    pub drop_missing: bool,
}

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input NetCDF / HDF5 (.nc, .nc4) file
    pub input: PathBuf,

    /// Output CSV. Defaults to Extracted_data_<variable>_<start>-<end>.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub grid: GridVarArgs,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Output table layout
    #[arg(short, long, value_enum, default_value = "wide")]
    pub layout: Layout,
}
