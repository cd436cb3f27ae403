//! # 插值结果导出
//!
//! 列顺序：
//! 1. 无表头的行号列（`--no-index` 时省略）
//! 2. 逐年列 `{prefix}{start}` … `{prefix}{end}`
//! 3. 标识列，按配置顺序的逆序（如 `ISO3`, `gID`）
//!
//! ## 依赖关系
//! - 被 `commands/interpolate.rs`, `commands/run.rs` 调用
//! - 使用 `models/projection.rs` 的 DensifiedTable
//! - 使用 `csv` 写入

use crate::error::{Result, SspGridError};
use crate::export::format_f64;
use crate::models::DensifiedTable;

use std::io::Write;
use std::path::Path;

/// 写出到任意 writer
pub fn write_densified<W: Write>(table: &DensifiedTable, writer: W, include_index: bool) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = Vec::new();
    if include_index {
        header.push(String::new());
    }
    header.extend(table.year_columns());
    header.extend(table.id_columns.iter().rev().cloned());
    wtr.write_record(&header)?;

    for (i, row) in table.rows.iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if include_index {
            record.push(i.to_string());
        }
        record.extend(row.values.iter().map(|&v| format_f64(v)));
        record.extend(row.ids.iter().rev().cloned());
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| SspGridError::Other(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

/// 写出到文件
pub fn to_csv(table: &DensifiedTable, output_path: &Path, include_index: bool) -> Result<()> {
    let file = std::fs::File::create(output_path).map_err(|e| SspGridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    write_densified(table, std::io::BufWriter::new(file), include_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DensifiedRow;

    fn table() -> DensifiedTable {
        DensifiedTable {
            id_columns: vec!["gID".to_string(), "ISO3".to_string()],
            prefix: "g2_".to_string(),
            years: vec![2009, 2010],
            anchor_years: vec![2010],
            rows: vec![DensifiedRow {
                ids: vec!["7".to_string(), "BRA".to_string()],
                values: vec![f64::NAN, 42.0],
            }],
        }
    }

    #[test]
    fn test_column_order_with_index() {
        let mut buf = Vec::new();
        write_densified(&table(), &mut buf, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, ",g2_2009,g2_2010,ISO3,gID\n0,,42.0,BRA,7\n");
    }

    #[test]
    fn test_without_index() {
        let mut buf = Vec::new();
        write_densified(&table(), &mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "g2_2009,g2_2010,ISO3,gID\n,42.0,BRA,7\n");
    }
}
