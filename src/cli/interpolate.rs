//! # interpolate 子命令 CLI 定义
//!
//! 单个投影 CSV 或目录批量插值。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/interpolate.rs`
//! - `InterpolationArgs` 同时被 `cli/run.rs` 使用

use super::WindowArgs;
use clap::Args;
use std::path::PathBuf;

/// 插值选项（interpolate 与 run 共用）
#[derive(Args, Debug, Clone)]
pub struct InterpolationArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Also use the nearest decadal column outside the window as an anchor
    #[arg(long, default_value_t = false)]
    pub use_outer_anchors: bool,

    /// Omit the leading row-index column from the output
    #[arg(long, default_value_t = false)]
    pub no_index: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}

/// interpolate 子命令参数
#[derive(Args, Debug)]
pub struct InterpolateArgs {
    /// Input: projection CSV file or directory containing them
    pub input: PathBuf,

    /// Output file (single mode). Defaults to <scenario>_<start>_<end>_<variable>.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory (batch mode). Defaults to the input directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Decadal column prefix, e.g. 'p2_' (auto-detected if omitted)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Comma-separated identifier columns carried through unchanged
    #[arg(long, default_value = "gID,ISO3")]
    pub id_columns: String,

    /// Fail unless the input has exactly this many rows
    #[arg(long)]
    pub expect_rows: Option<usize>,

    #[command(flatten)]
    pub options: InterpolationArgs,

    /// Glob pattern(s) for input files in batch mode (comma-separated)
    #[arg(short, long, default_value = "*.csv")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files (batch mode)
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Plot yearly column totals to this PNG/SVG file (single mode)
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
