//! # NetCDF 网格解析器
//!
//! 读取 `(time, lat, lon)` 三维变量（如 WaterGAP 的 `pdomww`），
//! 按年份窗口选取时间步，每步读取一个 `(1, nlat, nlon)` 超平面。
//!
//! ## 缺测处理
//! 等于 `_FillValue` / `missing_value` 或绝对值不小于 1e20 的格点记为 NaN。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs`, `commands/inspect.rs`, `commands/run.rs` 使用
//! - 使用 `parsers/time_axis.rs` 解码年份
//! - 使用 `netcdf` 读取 (HDF5 格式的 .nc4 同样适用)

use crate::error::{Result, SspGridError};
use crate::models::{GridCube, YearWindow};
use crate::parsers::time_axis;
use crate::utils::progress;

use netcdf::AttributeValue;
use std::path::Path;

/// 视为缺测的量级
const FILL_THRESHOLD: f64 = 1e20;

/// 网格读取参数
#[derive(Debug, Clone)]
pub struct GridRequest {
    pub variable: String,
    pub lat_var: String,
    pub lon_var: String,
    pub time_var: String,
    pub window: YearWindow,
    /// `time` 无可用单位时第 0 步对应的年份
    pub first_year: i32,
}

impl Default for GridRequest {
    fn default() -> Self {
        Self {
            variable: "pdomww".to_string(),
            lat_var: "lat".to_string(),
            lon_var: "lon".to_string(),
            time_var: "time".to_string(),
            window: YearWindow::default(),
            first_year: 1901,
        }
    }
}

/// 变量概要（用于 inspect）
#[derive(Debug, Clone)]
pub struct VariableInfo {
    pub name: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
    pub units: Option<String>,
}

/// 打开 NetCDF 文件
pub fn open_dataset(path: &Path) -> Result<netcdf::File> {
    if !path.is_file() {
        return Err(SspGridError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(netcdf::open(path)?)
}

fn find_variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| SspGridError::VariableNotFound {
            name: name.to_string(),
            path: path.display().to_string(),
        })
}

/// 字符串属性
fn string_attribute(var: &netcdf::Variable, name: &str) -> Option<String> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// 数值属性（取第一个元素）
fn numeric_attribute(var: &netcdf::Variable, name: &str) -> Option<f64> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Floats(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        _ => None,
    }
}

/// 变量的缺测标记值
fn fill_values(var: &netcdf::Variable) -> Vec<f64> {
    ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| numeric_attribute(var, name))
        .collect()
}

/// 将缺测格点替换为 NaN
pub fn mask_missing(values: &mut [f32], fills: &[f64]) {
    for v in values.iter_mut() {
        let x = f64::from(*v);
        if x.abs() >= FILL_THRESHOLD || fills.iter().any(|&f| f == x || f as f32 == *v) {
            *v = f32::NAN;
        }
    }
}

/// 读取一维坐标变量
fn read_coordinate(file: &netcdf::File, name: &str, path: &Path) -> Result<Vec<f64>> {
    let var = find_variable(file, name, path)?;
    if var.dimensions().len() != 1 {
        return Err(SspGridError::InvalidFormat(format!(
            "coordinate '{}' in {} is not one-dimensional",
            name,
            path.display()
        )));
    }
    Ok(var.get_values::<f64, _>(..)?)
}

/// 时间轴对应的日历年
pub fn read_time_years(
    file: &netcdf::File,
    time_var: &str,
    first_year: i32,
    path: &Path,
) -> Result<Vec<i32>> {
    let var = find_variable(file, time_var, path)?;
    let values = var.get_values::<f64, _>(..)?;
    let units = string_attribute(&var, "units");
    time_axis::decode_years(&values, units.as_deref(), first_year)
}

/// 按窗口选取时间步，返回 (时间索引, 年份)
pub fn select_time_steps(years: &[i32], window: YearWindow) -> std::result::Result<Vec<(usize, i32)>, Vec<i32>> {
    let selected: Vec<(usize, i32)> = years
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, y)| window.contains(y))
        .collect();

    let missing: Vec<i32> = window
        .years()
        .filter(|y| !selected.iter().any(|&(_, s)| s == *y))
        .collect();

    if missing.is_empty() {
        Ok(selected)
    } else {
        Err(missing)
    }
}

/// 读取网格变量
pub fn read_grid(path: &Path, req: &GridRequest) -> Result<GridCube> {
    let file = open_dataset(path)?;

    let var = find_variable(&file, &req.variable, path)?;
    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(SspGridError::InvalidFormat(format!(
            "variable '{}' has {} dimensions, expected (time, lat, lon)",
            req.variable,
            dims.len()
        )));
    }
    let (ntime, nlat, nlon) = (dims[0].len(), dims[1].len(), dims[2].len());

    let lat = read_coordinate(&file, &req.lat_var, path)?;
    let lon = read_coordinate(&file, &req.lon_var, path)?;
    if lat.len() != nlat || lon.len() != nlon {
        return Err(SspGridError::InvalidFormat(format!(
            "'{}' is {}x{}x{} but coordinates are lat={} lon={}",
            req.variable,
            ntime,
            nlat,
            nlon,
            lat.len(),
            lon.len()
        )));
    }

    let all_years = read_time_years(&file, &req.time_var, req.first_year, path)?;
    if all_years.len() != ntime {
        return Err(SspGridError::InvalidFormat(format!(
            "time axis has {} steps but '{}' has {}",
            all_years.len(),
            req.variable,
            ntime
        )));
    }

    let steps = select_time_steps(&all_years, req.window).map_err(|missing| {
        SspGridError::MissingYears {
            path: path.display().to_string(),
            years: missing
                .iter()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    })?;

    log::debug!(
        "{}: '{}' {}x{}x{}, reading {} time steps",
        path.display(),
        req.variable,
        ntime,
        nlat,
        nlon,
        steps.len()
    );

    let fills = fill_values(&var);
    let pb = progress::create_progress_bar(steps.len() as u64, "Reading slices");

    let mut slices = Vec::with_capacity(steps.len());
    for &(t, _) in &steps {
        let mut values = var.get_values::<f32, _>((&[t, 0, 0], &[1, nlat, nlon]))?;
        mask_missing(&mut values, &fills);
        slices.push(values);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(GridCube {
        variable: req.variable.clone(),
        lat,
        lon,
        years: steps.iter().map(|&(_, y)| y).collect(),
        slices,
    })
}

/// 列出文件中的全部变量
pub fn describe_variables(path: &Path) -> Result<Vec<VariableInfo>> {
    let file = open_dataset(path)?;

    let mut infos: Vec<VariableInfo> = file
        .variables()
        .map(|var| {
            let dims = var.dimensions();
            VariableInfo {
                name: var.name(),
                dimensions: dims.iter().map(|d| d.name()).collect(),
                shape: dims.iter().map(|d| d.len()).collect(),
                units: string_attribute(&var, "units"),
            }
        })
        .collect();
    infos.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(infos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_missing() {
        let mut values = vec![1.0f32, 1e20, -9999.0, 3.5, f32::MAX];
        mask_missing(&mut values, &[-9999.0]);
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
        assert_eq!(values[3], 3.5);
        assert!(values[4].is_nan());
    }

    #[test]
    fn test_select_time_steps() {
        let years: Vec<i32> = (1901..=2016).collect();
        let steps = select_time_steps(&years, YearWindow::default()).unwrap();
        assert_eq!(steps.len(), 37);
        assert_eq!(steps[0], (79, 1980));
        assert_eq!(steps[36], (115, 2016));

        let missing = select_time_steps(&years, YearWindow::new(2015, 2018).unwrap()).unwrap_err();
        assert_eq!(missing, vec![2017, 2018]);
    }

    const FILL: f32 = -9999.0;

    /// 3 x 2 x 3 的 `(time, lat, lon)` 测试文件，格点值为 `100 * t + 10 * ilat + ilon`，
    /// 第 1 步的 (ilat=1, ilon=2) 为缺测
    fn write_sample_grid(path: &Path) -> std::result::Result<(), netcdf::Error> {
        let mut nc = netcdf::create(path)?;
        nc.add_dimension("time", 3)?;
        nc.add_dimension("lat", 2)?;
        nc.add_dimension("lon", 3)?;

        {
            let mut v = nc.add_variable::<f64>("time", &["time"])?;
            v.put_attribute("units", "years since 1901-1-1 00:00:00")?;
            v.put_values(&[79.0, 80.0, 81.0], ..)?;
        }
        nc.add_variable::<f64>("lat", &["lat"])?.put_values(&[-0.25, 0.25], ..)?;
        nc.add_variable::<f64>("lon", &["lon"])?.put_values(&[10.25, 10.75, 11.25], ..)?;
        nc.add_variable::<f64>("steps", &["lat"])?.put_values(&[0.0, 1.0], ..)?;
        nc.add_variable::<f32>("area", &["lat", "lon"])?.put_values(&[1.0f32; 6], ..)?;

        let mut v = nc.add_variable::<f32>("pdomww", &["time", "lat", "lon"])?;
        v.set_fill_value(FILL)?;
        v.put_attribute("units", "kg m-2 s-1")?;
        for t in 0..3usize {
            let mut slice: Vec<f32> = (0..2)
                .flat_map(|ilat| (0..3).map(move |ilon| (100 * t + 10 * ilat + ilon) as f32))
                .collect();
            if t == 1 {
                slice[5] = FILL;
            }
            v.put_values(&slice, (&[t, 0, 0], &[1, 2, 3]))?;
        }
        Ok(())
    }

    fn sample_request(start: i32, end: i32) -> GridRequest {
        GridRequest {
            window: YearWindow::new(start, end).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_read_grid_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.nc4");
        write_sample_grid(&path).unwrap();

        let cube = read_grid(&path, &sample_request(1980, 1982)).unwrap();
        assert_eq!(cube.variable, "pdomww");
        assert_eq!(cube.years, vec![1980, 1981, 1982]);
        assert_eq!(cube.lat, vec![-0.25, 0.25]);
        assert_eq!(cube.lon, vec![10.25, 10.75, 11.25]);

        // lat 优先: value(t, ilat, ilon)
        assert_eq!(cube.value(0, 0, 2), 2.0);
        assert_eq!(cube.value(0, 1, 0), 10.0);
        assert_eq!(cube.value(2, 1, 2), 212.0);
        assert!(cube.value(1, 1, 2).is_nan());
        assert_eq!(cube.value(1, 1, 1), 111.0);
    }

    #[test]
    fn test_read_grid_subwindow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.nc4");
        write_sample_grid(&path).unwrap();

        let cube = read_grid(&path, &sample_request(1981, 1982)).unwrap();
        assert_eq!(cube.years, vec![1981, 1982]);
        assert_eq!(cube.slices.len(), 2);
        assert_eq!(cube.value(1, 0, 0), 200.0);
    }

    #[test]
    fn test_read_grid_missing_years() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.nc4");
        write_sample_grid(&path).unwrap();

        match read_grid(&path, &sample_request(1981, 1984)) {
            Err(SspGridError::MissingYears { years, .. }) => assert_eq!(years, "1983,1984"),
            other => panic!("expected MissingYears, got {:?}", other),
        }
    }

    #[test]
    fn test_read_grid_shape_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.nc4");
        write_sample_grid(&path).unwrap();

        let rank2 = GridRequest {
            variable: "area".to_string(),
            ..sample_request(1980, 1982)
        };
        assert!(matches!(read_grid(&path, &rank2), Err(SspGridError::InvalidFormat(_))));

        let bad_lat = GridRequest {
            lat_var: "lon".to_string(),
            ..sample_request(1980, 1982)
        };
        assert!(matches!(read_grid(&path, &bad_lat), Err(SspGridError::InvalidFormat(_))));

        let bad_time = GridRequest {
            time_var: "steps".to_string(),
            ..sample_request(1980, 1982)
        };
        assert!(matches!(read_grid(&path, &bad_time), Err(SspGridError::InvalidFormat(_))));

        let unknown = GridRequest {
            variable: "qtot".to_string(),
            ..sample_request(1980, 1982)
        };
        assert!(matches!(
            read_grid(&path, &unknown),
            Err(SspGridError::VariableNotFound { .. })
        ));
    }

    #[test]
    fn test_describe_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.nc4");
        write_sample_grid(&path).unwrap();

        let infos = describe_variables(&path).unwrap();
        let names: Vec<&str> = infos.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["area", "lat", "lon", "pdomww", "steps", "time"]);

        let pdomww = &infos[3];
        assert_eq!(pdomww.dimensions, vec!["time", "lat", "lon"]);
        assert_eq!(pdomww.shape, vec![3, 2, 3]);
        assert_eq!(pdomww.units.as_deref(), Some("kg m-2 s-1"));

        let file = open_dataset(&path).unwrap();
        let years = read_time_years(&file, "time", 1901, &path).unwrap();
        assert_eq!(years, vec![1980, 1981, 1982]);
    }

    #[test]
    fn test_missing_dataset() {
        let err = read_grid(Path::new("/nonexistent/grid.nc4"), &GridRequest::default());
        assert!(matches!(err, Err(SspGridError::FileNotFound { .. })));
    }
}
