//! # 锚点列识别
//!
//! 锚点列命名为 `{prefix}{YYYY}`，例如 `p2_2010`。
//!
//! ## 依赖关系
//! - 被 `parsers/projection.rs`, `interp/linear.rs` 使用
//! - 使用 `regex`

use crate::error::{Result, SspGridError};
use crate::models::YearWindow;

use regex::Regex;
use std::collections::HashMap;

fn column_regex() -> Regex {
    Regex::new(r"^(?P<prefix>[A-Za-z0-9]+_)(?P<year>\d{4})$").unwrap()
}

/// 自动识别锚点列前缀（出现次数最多者）
pub fn detect_prefix(headers: &[String]) -> Result<String> {
    let re = column_regex();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for h in headers {
        if let Some(caps) = re.captures(h.trim()) {
            *counts.entry(caps["prefix"].to_string()).or_default() += 1;
        }
    }

    // 次数相同时按名称排序，保证结果稳定
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(prefix, _)| prefix)
        .ok_or_else(|| SspGridError::InvalidFormat("no '<prefix>_<YYYY>' columns found".to_string()))
}

/// 列出给定前缀的全部锚点列，返回 (年份, 列索引)，按年份升序
pub fn decadal_columns(headers: &[String], prefix: &str) -> Vec<(i32, usize)> {
    let mut cols: Vec<(i32, usize)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| {
            let rest = h.trim().strip_prefix(prefix)?;
            if rest.len() != 4 || !rest.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            rest.parse::<i32>().ok().map(|year| (year, idx))
        })
        .collect();
    cols.sort_by_key(|&(year, _)| year);
    cols.dedup_by_key(|c| c.0);
    cols
}

/// 按窗口筛选参与插值的锚点
///
/// `use_outer_anchors` 时额外保留窗口前最近与窗口后最近的一个锚点，
/// 使窗口边缘的年份朝相邻十年插值而不是保持不变。
pub fn select_anchors(
    columns: &[(i32, usize)],
    window: YearWindow,
    use_outer_anchors: bool,
) -> Vec<(i32, usize)> {
    let mut selected: Vec<(i32, usize)> = columns
        .iter()
        .copied()
        .filter(|&(year, _)| window.contains(year))
        .collect();

    if use_outer_anchors {
        if let Some(&before) = columns.iter().rev().find(|&&(y, _)| y < window.start) {
            selected.insert(0, before);
        }
        if let Some(&after) = columns.iter().find(|&&(y, _)| y > window.end) {
            selected.push(after);
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_prefix() {
        let h = headers(&["gID", "ISO3", "p2_1980", "p2_1990", "g2_1980", "p2_2000"]);
        assert_eq!(detect_prefix(&h).unwrap(), "p2_");

        let h = headers(&["gID", "ISO3", "area"]);
        assert!(detect_prefix(&h).is_err());
    }

    #[test]
    fn test_decadal_columns_sorted() {
        let h = headers(&["gID", "p2_2000", "ISO3", "p2_1980", "p2_1990", "p2_19x0", "p2_10000"]);
        assert_eq!(decadal_columns(&h, "p2_"), vec![(1980, 3), (1990, 4), (2000, 1)]);
        assert!(decadal_columns(&h, "g2_").is_empty());
    }

    #[test]
    fn test_select_anchors_window_only() {
        let cols: Vec<(i32, usize)> = (0..13).map(|i| (1980 + 10 * i, i as usize)).collect();
        let window = YearWindow::default();

        let years: Vec<i32> = select_anchors(&cols, window, false)
            .into_iter()
            .map(|c| c.0)
            .collect();
        assert_eq!(years, vec![1980, 1990, 2000, 2010]);

        let years: Vec<i32> = select_anchors(&cols, window, true)
            .into_iter()
            .map(|c| c.0)
            .collect();
        assert_eq!(years, vec![1980, 1990, 2000, 2010, 2020]);
    }

    #[test]
    fn test_select_anchors_outer_before_start() {
        let cols = vec![(1970, 0), (1980, 1), (1990, 2)];
        let window = YearWindow::new(1975, 1985).unwrap();
        let years: Vec<i32> = select_anchors(&cols, window, true)
            .into_iter()
            .map(|c| c.0)
            .collect();
        assert_eq!(years, vec![1970, 1980, 1990]);
    }
}
