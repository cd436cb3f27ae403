//! # 工具函数模块
//!
//! 提供美化输出、进度条、工作目录切换等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output, progress, workdir

pub mod output;
pub mod progress;
pub mod workdir;
