//! # 网格融化导出
//!
//! 将 `(year, lat, lon)` 网格展平为表格：
//! - `wide`: `lat,lon,<year>...`，每个格点一行
//! - `long`: `lat,lon,year,value`，每个格点每年一行
//!
//! 行顺序为先经度后纬度（每个 lon 下遍历全部 lat）。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `commands/run.rs` 调用
//! - 使用 `models/grid.rs` 的 GridCube
//! - 使用 `csv` + `serde` 写入

use crate::error::{Result, SspGridError};
use crate::export::{format_f32, format_f64};
use crate::models::GridCube;

use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// 输出布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLayout {
    #[default]
    Wide,
    Long,
}

/// long 布局的一行
#[derive(Debug, Serialize)]
struct LongRecord {
    lat: f64,
    lon: f64,
    year: i32,
    value: Option<f32>,
}

/// 写出统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MeltSummary {
    pub cells_written: usize,
    pub cells_dropped: usize,
}

/// 融化并写出到任意 writer
pub fn write_melted<W: Write>(
    cube: &GridCube,
    writer: W,
    layout: GridLayout,
    drop_missing: bool,
) -> Result<MeltSummary> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut summary = MeltSummary::default();

    // long 布局的表头由 serialize 写出
    if layout == GridLayout::Wide {
        let mut header = vec!["lat".to_string(), "lon".to_string()];
        header.extend(cube.years.iter().map(|y| y.to_string()));
        wtr.write_record(&header)?;
    }

    for (ilat, ilon) in cube.melt_order() {
        if drop_missing && cube.is_all_missing(ilat, ilon) {
            summary.cells_dropped += 1;
            continue;
        }

        match layout {
            GridLayout::Wide => {
                let mut record = Vec::with_capacity(2 + cube.years.len());
                record.push(format_f64(cube.lat[ilat]));
                record.push(format_f64(cube.lon[ilon]));
                record.extend((0..cube.years.len()).map(|t| format_f32(cube.value(t, ilat, ilon))));
                wtr.write_record(&record)?;
            }
            GridLayout::Long => {
                for (t, &year) in cube.years.iter().enumerate() {
                    let v = cube.value(t, ilat, ilon);
                    wtr.serialize(LongRecord {
                        lat: cube.lat[ilat],
                        lon: cube.lon[ilon],
                        year,
                        value: if v.is_nan() { None } else { Some(v) },
                    })?;
                }
            }
        }
        summary.cells_written += 1;
    }

    wtr.flush().map_err(|e| SspGridError::Other(format!("Failed to flush CSV: {}", e)))?;
    Ok(summary)
}

/// 融化并写出到文件
pub fn to_csv(
    cube: &GridCube,
    output_path: &Path,
    layout: GridLayout,
    drop_missing: bool,
) -> Result<MeltSummary> {
    let file = std::fs::File::create(output_path).map_err(|e| SspGridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    write_melted(cube, std::io::BufWriter::new(file), layout, drop_missing)
}
