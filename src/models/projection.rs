//! # 投影表数据模型
//!
//! SSP 投影 CSV 在内存中的表示：标识列 + 十年间隔的锚点列，
//! 以及插值后逐年展开的结果表。
//!
//! ## 依赖关系
//! - 被 `parsers/projection.rs` 构建
//! - 被 `interp/`, `export/projection.rs`, `export/plot.rs` 使用

/// 投影表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRow {
    /// 标识列取值（与 `ProjectionTable::id_columns` 对齐）
    pub ids: Vec<String>,
    /// 锚点列取值（与 `ProjectionTable::anchor_years` 对齐），空值为 NaN
    pub values: Vec<f64>,
}

/// 从 CSV 读入的投影表
#[derive(Debug, Clone)]
pub struct ProjectionTable {
    /// 来源文件（用于报错）
    pub source: String,
    /// 标识列名，如 `gID`, `ISO3`
    pub id_columns: Vec<String>,
    /// 锚点列前缀，如 `p2_`
    pub prefix: String,
    /// 锚点年份，按年份升序
    pub anchor_years: Vec<i32>,
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 插值后的一行
#[derive(Debug, Clone, PartialEq)]
pub struct DensifiedRow {
    pub ids: Vec<String>,
    /// 与 `DensifiedTable::years` 对齐
    pub values: Vec<f64>,
}

/// 逐年展开后的投影表
#[derive(Debug, Clone)]
pub struct DensifiedTable {
    pub id_columns: Vec<String>,
    pub prefix: String,
    pub years: Vec<i32>,
    /// 参与插值的锚点年份
    pub anchor_years: Vec<i32>,
    pub rows: Vec<DensifiedRow>,
}

impl DensifiedTable {
    /// 年份列名，如 `p2_1981`
    pub fn year_columns(&self) -> Vec<String> {
        self.years
            .iter()
            .map(|y| format!("{}{}", self.prefix, y))
            .collect()
    }

    /// 每年的列合计（忽略 NaN）
    pub fn column_totals(&self) -> Vec<(i32, f64)> {
        self.years
            .iter()
            .enumerate()
            .map(|(i, &year)| {
                let total = self
                    .rows
                    .iter()
                    .map(|r| r.values[i])
                    .filter(|v| !v.is_nan())
                    .sum();
                (year, total)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_totals_skip_nan() {
        let table = DensifiedTable {
            id_columns: vec!["gID".to_string()],
            prefix: "p2_".to_string(),
            years: vec![2000, 2001],
            anchor_years: vec![2000],
            rows: vec![
                DensifiedRow {
                    ids: vec!["1".to_string()],
                    values: vec![1.0, f64::NAN],
                },
                DensifiedRow {
                    ids: vec!["2".to_string()],
                    values: vec![2.0, 3.0],
                },
            ],
        };

        assert_eq!(table.year_columns(), vec!["p2_2000", "p2_2001"]);
        assert_eq!(table.column_totals(), vec![(2000, 3.0), (2001, 3.0)]);
    }
}
