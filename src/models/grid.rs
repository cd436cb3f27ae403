//! # 网格数据模型
//!
//! 从 NetCDF 读出的 `(time, lat, lon)` 变量，按年切片保存。
//!
//! ## 依赖关系
//! - 被 `parsers/grid.rs` 构建
//! - 被 `export/grid.rs` 使用

/// 按年切片的网格变量
#[derive(Debug, Clone)]
pub struct GridCube {
    /// 变量名，如 `pdomww`
    pub variable: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// 每个切片对应的日历年
    pub years: Vec<i32>,
    /// 每年一个切片，lat 优先排列 (`ilat * nlon + ilon`)，缺测为 NaN
    pub slices: Vec<Vec<f32>>,
}

impl GridCube {
    pub fn nlat(&self) -> usize {
        self.lat.len()
    }

    pub fn nlon(&self) -> usize {
        self.lon.len()
    }

    /// 某格点在第 `t` 个切片上的值
    pub fn value(&self, t: usize, ilat: usize, ilon: usize) -> f32 {
        self.slices[t][ilat * self.nlon() + ilon]
    }

    /// 格点在所有年份均缺测
    pub fn is_all_missing(&self, ilat: usize, ilon: usize) -> bool {
        (0..self.years.len()).all(|t| self.value(t, ilat, ilon).is_nan())
    }

    /// 融化顺序：先经度后纬度（每个 lon 下遍历全部 lat）
    pub fn melt_order(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.nlon()).flat_map(move |ilon| (0..self.nlat()).map(move |ilat| (ilat, ilon)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melt_order_is_lon_major() {
        let cube = GridCube {
            variable: "v".to_string(),
            lat: vec![10.0, 20.0],
            lon: vec![1.0, 2.0, 3.0],
            years: vec![2000],
            slices: vec![vec![0.0; 6]],
        };
        let order: Vec<_> = cube.melt_order().collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_value_indexing() {
        let cube = GridCube {
            variable: "v".to_string(),
            lat: vec![10.0, 20.0],
            lon: vec![1.0, 2.0],
            years: vec![2000, 2001],
            slices: vec![vec![1.0, 2.0, 3.0, f32::NAN], vec![5.0, 6.0, 7.0, f32::NAN]],
        };
        assert_eq!(cube.value(1, 1, 0), 7.0);
        assert!(cube.is_all_missing(1, 1));
        assert!(!cube.is_all_missing(0, 1));
    }
}
