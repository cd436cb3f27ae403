//! # sspgrid - SSP 投影插值与网格提取工具
//!
//! 将 SSP2 人口/GDP 投影的十年间隔列插值为逐年列，
//! 并把 WaterGAP 网格变量（如 `pdomww`）融化为平面 CSV 表格。
//!
//! ## 子命令
//! - `interpolate` - 十年间隔 -> 逐年的线性插值（单文件或目录批处理）
//! - `extract`     - NetCDF `(time, lat, lon)` 变量融化为 CSV
//! - `inspect`     - 列出 NetCDF 变量与形状
//! - `run`         - 固定数据目录中的完整流程
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (CSV / NetCDF 读取)
//!   │     ├── interp/    (线性插值)
//!   │     ├── export/    (CSV 写出与绘图)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod export;
mod interp;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
