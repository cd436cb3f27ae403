//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `interp/`, `export/`, `utils/`
//! - 子模块: interpolate, extract, inspect, run

pub mod extract;
pub mod inspect;
pub mod interpolate;
pub mod run;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Interpolate(args) => interpolate::execute(args),
        Commands::Extract(args) => extract::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Run(args) => run::execute(args),
    }
}
