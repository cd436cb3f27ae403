//! # extract 命令实现
//!
//! 从 NetCDF 文件读取 `(time, lat, lon)` 变量，按年份窗口切片并融化为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `parsers/grid.rs`, `export/grid.rs`
//! - `extract_grid` 同时被 `commands/run.rs` 使用

use crate::cli::extract::{ExtractArgs, GridVarArgs, Layout};
use crate::error::{Result, SspGridError};
use crate::export;
use crate::export::grid::MeltSummary;
use crate::models::YearWindow;
use crate::parsers::{read_grid, GridRequest};
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};

/// 默认输出文件名，如 `Extracted_data_pdomww_1980-2016.csv`
pub fn default_output_name(variable: &str, window: YearWindow) -> String {
    format!("Extracted_data_{}_{}-{}.csv", variable, window.start, window.end)
}

/// 由 CLI 参数构建读取请求
pub fn grid_request(grid: &GridVarArgs, window: YearWindow) -> GridRequest {
    GridRequest {
        variable: grid.variable.clone(),
        lat_var: grid.lat_var.clone(),
        lon_var: grid.lon_var.clone(),
        time_var: grid.time_var.clone(),
        window,
        first_year: grid.first_year,
    }
}

/// 读取网格并写出融化表
pub fn extract_grid(
    input: &Path,
    output_path: &Path,
    req: &GridRequest,
    layout: Layout,
    drop_missing: bool,
) -> Result<MeltSummary> {
    let cube = read_grid(input, req)?;

    output::print_info(&format!(
        "'{}': {} lat x {} lon, {} years ({}-{})",
        cube.variable,
        cube.nlat(),
        cube.nlon(),
        cube.years.len(),
        cube.years.first().copied().unwrap_or_default(),
        cube.years.last().copied().unwrap_or_default()
    ));

    let spinner = progress::create_spinner(&format!("Writing {} layout", layout));
    let summary = export::grid::to_csv(&cube, output_path, layout.into(), drop_missing);
    spinner.finish_and_clear();

    summary
}

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting Gridded Variable");

    if !args.input.is_file() {
        return Err(SspGridError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let window = args.window.window()?;
    let req = grid_request(&args.grid, window);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_output_name(&req.variable, window)));

    let summary = extract_grid(
        &args.input,
        &output_path,
        &req,
        args.layout,
        args.grid.drop_missing,
    )?;

    if summary.cells_dropped > 0 {
        output::print_skip(&format!(
            "{} cells missing in every year dropped",
            summary.cells_dropped
        ));
    }
    output::print_written(&args.input, &output_path);
    output::print_done(&format!("{} grid cells written", summary.cells_written));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output_name("pdomww", YearWindow::default()),
            "Extracted_data_pdomww_1980-2016.csv"
        );
    }

    #[test]
    fn test_missing_input() {
        let args = ExtractArgs {
            input: PathBuf::from("/nonexistent/watergap.nc4"),
            output: None,
            grid: GridVarArgs {
                variable: "pdomww".to_string(),
                lat_var: "lat".to_string(),
                lon_var: "lon".to_string(),
                time_var: "time".to_string(),
                first_year: 1901,
                drop_missing: false,
            },
            window: crate::cli::WindowArgs {
                start: 1980,
                end: 2016,
            },
            layout: Layout::Wide,
        };
        assert!(matches!(execute(args), Err(SspGridError::FileNotFound { .. })));
    }
}
