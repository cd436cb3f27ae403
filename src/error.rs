//! # 统一错误处理模块
//!
//! 定义 sspgrid 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// sspgrid 统一错误类型
#[derive(Error, Debug)]
pub enum SspGridError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 数据一致性错误
    // ─────────────────────────────────────────────────────────────
    #[error("Row count mismatch in {path}: expected {expected}, found {found}")]
    RowCountMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("Years not present on the time axis of {path}: {years}")]
    MissingYears { path: String, years: String },

    #[error("Variable '{name}' not found in {path}")]
    VariableNotFound { name: String, path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid year window: {start}-{end}")]
    InvalidWindow { start: i32, end: i32 },

    // ─────────────────────────────────────────────────────────────
    // 外部库错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("NetCDF error: {0}")]
    NetcdfError(#[from] netcdf::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SspGridError>;
