//! # 工作目录切换
//!
//! `run` 命令在固定数据目录中执行。切换失败时区分三种情况
//! （目录不存在 / 不是目录 / 无权限），打印后继续在当前目录执行。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `thiserror` 派生错误类型

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 切换失败的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChdirFailure {
    #[error("Directory: {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("You do not have permissions to change to {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Cannot change to {}: {}", .0.display(), .1)]
    Other(PathBuf, String),
}

/// 归类切换失败的 I/O 错误
pub fn classify(path: &Path, err: &io::Error) -> ChdirFailure {
    if path.exists() && !path.is_dir() {
        return ChdirFailure::NotADirectory(path.to_path_buf());
    }
    match err.kind() {
        io::ErrorKind::NotFound => ChdirFailure::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ChdirFailure::PermissionDenied(path.to_path_buf()),
        _ => ChdirFailure::Other(path.to_path_buf(), err.to_string()),
    }
}

/// 切换进程工作目录，成功时返回新的工作目录
pub fn change_dir(path: &Path) -> std::result::Result<PathBuf, ChdirFailure> {
    std::env::set_current_dir(path).map_err(|e| classify(path, &e))?;
    std::env::current_dir().map_err(|e| classify(path, &e))
}

/// 当前工作目录（不可读时返回 "?"）
pub fn current_dir_display() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "?".to_string())
}
