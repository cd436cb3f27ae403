//! # 年份窗口
//!
//! 闭区间 `[start, end]`，插值与网格提取共用。
//!
//! ## 依赖关系
//! - 被 `interp/`, `parsers/grid.rs`, `commands/` 使用

use crate::error::{Result, SspGridError};

/// WaterGAP 数据截止于 2016 年，默认窗口与之对齐
pub const DEFAULT_START_YEAR: i32 = 1980;
pub const DEFAULT_END_YEAR: i32 = 2016;

/// 年份闭区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: i32,
    pub end: i32,
}

impl YearWindow {
    /// 创建并校验窗口
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(SspGridError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// 窗口内年份数
    pub fn len(&self) -> usize {
        (i64::from(self.end) - i64::from(self.start) + 1) as usize
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// 逐年迭代
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

impl Default for YearWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

impl std::fmt::Display for YearWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let w = YearWindow::default();
        assert_eq!(w.len(), 37);
        assert!(w.contains(1980));
        assert!(w.contains(2016));
        assert!(!w.contains(2017));
        assert_eq!(w.years().next(), Some(1980));
        assert_eq!(w.to_string(), "1980-2016");
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(matches!(
            YearWindow::new(2020, 2010),
            Err(SspGridError::InvalidWindow { .. })
        ));
        assert_eq!(YearWindow::new(2000, 2000).unwrap().len(), 1);
    }

    #[test]
    fn test_extreme_window_len() {
        let w = YearWindow::new(i32::MIN, i32::MAX).unwrap();
        assert_eq!(w.len() as u64, 1u64 << 32);
        assert_eq!(YearWindow::new(-5, 5).unwrap().len(), 11);
    }
}
