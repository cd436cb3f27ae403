//! # 前向线性插值
//!
//! 对每一行的锚点序列做线性插值：
//! - 锚点年份取锚点值
//! - 两个有效锚点之间按直线插值
//! - 最后一个有效锚点之后保持该值
//! - 第一个有效锚点之前保持 NaN
//!
//! ## 依赖关系
//! - 被 `commands/interpolate.rs`, `commands/run.rs` 调用
//! - 使用 `interp/columns.rs` 筛选锚点
//! - 使用 `rayon` 逐行并行

use crate::error::{Result, SspGridError};
use crate::interp::select_anchors;
use crate::models::{DensifiedRow, DensifiedTable, ProjectionRow, ProjectionTable, YearWindow};
use crate::utils::progress;

use rayon::prelude::*;

/// 插值参数
#[derive(Debug, Clone, Copy)]
pub struct DensifyOptions {
    pub window: YearWindow,
    /// 使用窗口外最近的锚点
    pub use_outer_anchors: bool,
    /// 并行线程数 (0 = 自动, 1 = 串行)
    pub jobs: usize,
    pub show_progress: bool,
}

impl Default for DensifyOptions {
    fn default() -> Self {
        Self {
            window: YearWindow::default(),
            use_outer_anchors: false,
            jobs: 0,
            show_progress: true,
        }
    }
}

/// 对单条序列插值
///
/// `points` 须按年份升序，NaN 锚点被跳过。
pub fn interpolate_series(points: &[(i32, f64)], years: &[i32]) -> Vec<f64> {
    let valid: Vec<(i32, f64)> = points.iter().copied().filter(|(_, v)| !v.is_nan()).collect();

    let (first, last) = match (valid.first(), valid.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return vec![f64::NAN; years.len()],
    };

    years
        .iter()
        .map(|&year| {
            if year < first.0 {
                return f64::NAN;
            }
            if year >= last.0 {
                return last.1;
            }
            // valid[i - 1].0 <= year < valid[i].0
            let i = valid.partition_point(|&(y, _)| y <= year);
            let (y0, v0) = valid[i - 1];
            let (y1, v1) = valid[i];
            if year == y0 {
                return v0;
            }
            v0 + f64::from(year - y0) * (v1 - v0) / f64::from(y1 - y0)
        })
        .collect()
}

/// 将整张投影表加密为逐年表
pub fn densify(table: &ProjectionTable, opts: &DensifyOptions) -> Result<DensifiedTable> {
    let positions: Vec<(i32, usize)> = table
        .anchor_years
        .iter()
        .copied()
        .enumerate()
        .map(|(i, year)| (year, i))
        .collect();
    let anchors = select_anchors(&positions, opts.window, opts.use_outer_anchors);

    if anchors.is_empty() {
        return Err(SspGridError::InvalidArgument(format!(
            "no '{}YYYY' columns usable for window {} in {}",
            table.prefix, opts.window, table.source
        )));
    }

    log::debug!(
        "{}: anchors {:?}, {} rows",
        table.source,
        anchors.iter().map(|a| a.0).collect::<Vec<_>>(),
        table.len()
    );

    let years: Vec<i32> = opts.window.years().collect();

    let pb = if opts.show_progress {
        progress::create_progress_bar(table.len() as u64, "Interpolating")
    } else {
        indicatif::ProgressBar::hidden()
    };

    let densify_row = |row: &ProjectionRow| {
        let points: Vec<(i32, f64)> = anchors
            .iter()
            .map(|&(year, pos)| (year, row.values[pos]))
            .collect();
        let values = interpolate_series(&points, &years);
        pb.inc(1);
        DensifiedRow {
            ids: row.ids.clone(),
            values,
        }
    };

    let rows: Vec<DensifiedRow> = if opts.jobs == 1 {
        table.rows.iter().map(densify_row).collect()
    } else {
        let num_threads = if opts.jobs == 0 {
            num_cpus::get()
        } else {
            opts.jobs
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| SspGridError::Other(format!("Failed to build thread pool: {}", e)))?;
        pool.install(|| table.rows.par_iter().map(densify_row).collect())
    };

    pb.finish_and_clear();

    Ok(DensifiedTable {
        id_columns: table.id_columns.clone(),
        prefix: table.prefix.clone(),
        years,
        anchor_years: anchors.iter().map(|a| a.0).collect(),
        rows,
    })
}
