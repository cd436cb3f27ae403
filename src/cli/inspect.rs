//! # inspect 子命令 CLI 定义
//!
//! 列出 NetCDF 文件中的变量、维度与形状。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input NetCDF / HDF5 (.nc, .nc4) file
    pub input: PathBuf,

    /// Time coordinate variable used to report the year range
    #[arg(long, default_value = "time")]
    pub time_var: String,

    /// Year of time index 0 when the time variable has no usable units
    #[arg(long, default_value_t = 1901)]
    pub first_year: i32,
}
