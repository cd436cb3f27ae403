//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `interpolate`: 十年间隔投影表加密为逐年表
//! - `extract`: NetCDF 网格变量融化为 CSV
//! - `inspect`: 列出 NetCDF 变量
//! - `run`: 固定的 SSP2 + WaterGAP 全流程
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: interpolate, extract, inspect, run

pub mod extract;
pub mod inspect;
pub mod interpolate;
pub mod run;

use crate::error::Result;
use crate::models::window::{YearWindow, DEFAULT_END_YEAR, DEFAULT_START_YEAR};

use clap::{Args, Parser, Subcommand};

/// sspgrid - SSP 投影插值与网格提取工具
#[derive(Parser)]
#[command(name = "sspgrid")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Densify SSP projection tables and melt gridded WaterGAP variables into CSV",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Interpolate decadal projection columns into annual columns
    Interpolate(interpolate::InterpolateArgs),

    /// Extract a (time, lat, lon) NetCDF variable into a flat CSV table
    Extract(extract::ExtractArgs),

    /// List variables, dimensions and shapes of a NetCDF file
    Inspect(inspect::InspectArgs),

    /// Run the SSP2 population/GDP + WaterGAP pdomww pipeline
    Run(run::RunArgs),
}

/// 年份窗口参数（多个子命令共用）
#[derive(Args, Debug, Clone, Copy)]
pub struct WindowArgs {
    /// First year of the output window
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start: i32,

    /// Last year of the output window (inclusive)
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end: i32,
}

impl WindowArgs {
    /// 转换为校验后的窗口
    pub fn window(&self) -> Result<YearWindow> {
        YearWindow::new(self.start, self.end)
    }
}
