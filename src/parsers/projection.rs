//! # SSP 投影 CSV 解析器
//!
//! 读取 `pop_ssp2.csv` / `gdp_ssp2.csv` 一类的表格：
//! ```text
//! ...,gID,ISO3,p2_1980,p2_1990,...,p2_2100
//! ```
//! 只保留标识列与锚点列，其余列忽略。
//!
//! ## 依赖关系
//! - 被 `commands/interpolate.rs`, `commands/run.rs` 使用
//! - 使用 `interp/columns.rs` 识别锚点列
//! - 使用 `csv` 读取

use crate::error::{Result, SspGridError};
use crate::interp::{decadal_columns, detect_prefix};
use crate::models::{ProjectionRow, ProjectionTable};

use std::io::Read;
use std::path::Path;

/// 默认标识列
pub const DEFAULT_ID_COLUMNS: &[&str] = &["gID", "ISO3"];

/// 读取投影 CSV 文件
///
/// `prefix` 为 `None` 时自动识别。
pub fn parse_projection_file(
    path: &Path,
    id_columns: &[String],
    prefix: Option<&str>,
) -> Result<ProjectionTable> {
    if !path.is_file() {
        return Err(SspGridError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| SspGridError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_projection_reader(file, &path.display().to_string(), id_columns, prefix)
}

/// 从任意 reader 解析投影表
pub fn parse_projection_reader<R: Read>(
    reader: R,
    source: &str,
    id_columns: &[String],
    prefix: Option<&str>,
) -> Result<ProjectionTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let parse_error = |reason: String| SspGridError::ParseError {
        format: "projection csv".to_string(),
        path: source.to_string(),
        reason,
    };

    // 标识列位置
    let mut id_idx = Vec::with_capacity(id_columns.len());
    for name in id_columns {
        let idx = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| parse_error(format!("missing id column '{}'", name)))?;
        id_idx.push(idx);
    }

    let prefix = match prefix {
        Some(p) => p.to_string(),
        None => detect_prefix(&headers).map_err(|e| parse_error(e.to_string()))?,
    };

    let anchors = decadal_columns(&headers, &prefix);
    if anchors.is_empty() {
        return Err(parse_error(format!("no '{}YYYY' columns", prefix)));
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let ids = id_idx.iter().map(|&i| field(i).to_string()).collect();
        let values = anchors
            .iter()
            .map(|&(_, i)| field(i).parse::<f64>().unwrap_or(f64::NAN))
            .collect();

        rows.push(ProjectionRow { ids, values });
    }

    log::debug!(
        "{}: {} rows, prefix '{}', {} anchor columns",
        source,
        rows.len(),
        prefix,
        anchors.len()
    );

    Ok(ProjectionTable {
        source: source.to_string(),
        id_columns: id_columns.to_vec(),
        prefix,
        anchor_years: anchors.iter().map(|&(year, _)| year).collect(),
        rows,
    })
}

/// 解析逗号分隔的标识列参数
pub fn parse_id_columns(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<String> {
        parse_id_columns("gID, ISO3")
    }

    #[test]
    fn test_parse_projection_content() {
        let content = "\
OBJECTID,area,cell,gID,ISO3,p2_1990,p2_1980,p2_2000,g2_1980
0,1.5,x,101,AFG,20,10,,7
1,1.5,x,102,ALB,n/a,30
";
        let table = parse_projection_reader(content.as_bytes(), "pop.csv", &ids(), None).unwrap();

        assert_eq!(table.prefix, "p2_");
        assert_eq!(table.anchor_years, vec![1980, 1990, 2000]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].ids, vec!["101", "AFG"]);
        assert_eq!(table.rows[0].values[..2], [10.0, 20.0]);
        assert!(table.rows[0].values[2].is_nan());
        // 非数值与缺失字段均为 NaN
        assert!(table.rows[1].values[1].is_nan());
        assert!(table.rows[1].values[2].is_nan());
    }

    #[test]
    fn test_explicit_prefix() {
        let content = "gID,ISO3,p2_1980,g2_1980,g2_1990\n1,AFG,1,2,3\n";
        let table =
            parse_projection_reader(content.as_bytes(), "gdp.csv", &ids(), Some("g2_")).unwrap();
        assert_eq!(table.anchor_years, vec![1980, 1990]);
        assert_eq!(table.rows[0].values, vec![2.0, 3.0]);
    }

    #[test]
    fn test_missing_id_column() {
        let content = "gID,p2_1980\n1,2\n";
        let err = parse_projection_reader(content.as_bytes(), "x.csv", &ids(), None).unwrap_err();
        assert!(err.to_string().contains("missing id column 'ISO3'"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_projection_file(Path::new("/nonexistent/pop.csv"), &ids(), None);
        assert!(matches!(err, Err(SspGridError::FileNotFound { .. })));
    }
}
