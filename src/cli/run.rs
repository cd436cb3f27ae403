//! # run 子命令 CLI 定义
//!
//! 在数据目录中执行完整流程：
//! 人口、GDP 插值 + WaterGAP `pdomww` 提取。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use super::extract::GridVarArgs;
use super::interpolate::InterpolationArgs;

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Data directory to change into before running (failure is reported, not fatal)
    #[arg(short, long, env = "SSPGRID_WORKDIR")]
    pub workdir: Option<PathBuf>,

    #[command(flatten)]
    pub options: InterpolationArgs,

    #[command(flatten)]
    pub grid: GridVarArgs,

    /// Skip the WaterGAP grid extraction step
    #[arg(long, default_value_t = false)]
    pub skip_grid: bool,
}
