//! # interpolate 命令实现
//!
//! 将 SSP 投影表的十年间隔列加密为逐年列。
//!
//! ## 功能
//! - 单文件模式：读取、插值、写出，可选绘制年度合计图
//! - 目录模式：按模式收集投影 CSV 并行处理，汇总成功/跳过/失败
//! - 可选行数校验 (`--expect-rows`)
//!
//! ## 依赖关系
//! - 使用 `cli/interpolate.rs` 定义的参数
//! - 使用 `parsers/projection.rs`, `interp/`, `export/`
//! - 使用 `batch/` 进行目录批处理
//! - `interpolate_file` 同时被 `commands/run.rs` 使用

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::interpolate::{InterpolateArgs, InterpolationArgs};
use crate::error::{Result, SspGridError};
use crate::export;
use crate::interp::{densify, DensifyOptions};
use crate::models::{DensifiedTable, YearWindow};
use crate::parsers::parse_projection_file;
use crate::parsers::projection::{parse_id_columns, DEFAULT_ID_COLUMNS};
use crate::utils::output;

use regex::Regex;
use std::path::{Path, PathBuf};

/// 单个文件的插值任务
#[derive(Debug, Clone)]
pub struct InterpolationJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub id_columns: Vec<String>,
    pub prefix: Option<String>,
    pub expect_rows: Option<usize>,
    pub densify: DensifyOptions,
    pub include_index: bool,
}

impl InterpolationJob {
    /// 由共享插值参数构建任务
    pub fn from_options(
        input: PathBuf,
        output: PathBuf,
        options: &InterpolationArgs,
        window: YearWindow,
    ) -> Self {
        Self {
            input,
            output,
            id_columns: DEFAULT_ID_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            prefix: None,
            expect_rows: None,
            densify: DensifyOptions {
                window,
                use_outer_anchors: options.use_outer_anchors,
                jobs: options.jobs,
                show_progress: true,
            },
            include_index: !options.no_index,
        }
    }
}

/// 读取、插值并写出单个文件
pub fn interpolate_file(job: &InterpolationJob) -> Result<DensifiedTable> {
    let table = parse_projection_file(&job.input, &job.id_columns, job.prefix.as_deref())?;

    if let Some(expected) = job.expect_rows {
        if table.len() != expected {
            return Err(SspGridError::RowCountMismatch {
                path: job.input.display().to_string(),
                expected,
                found: table.len(),
            });
        }
    }

    if table.is_empty() {
        log::warn!("{}: no data rows", table.source);
    }

    let densified = densify(&table, &job.densify)?;
    export::projection::to_csv(&densified, &job.output, job.include_index)?;

    Ok(densified)
}

/// 由输入文件名推断输出文件名
///
/// `pop_ssp2.csv` -> `ssp2_1980_2016_pop.csv`，其余 -> `<stem>_1980_2016.csv`
pub fn default_output_name(input: &Path, window: YearWindow) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("projection");

    let re = Regex::new(r"(?i)^(?P<var>.+)_(?P<scen>ssp\d+)$").unwrap();
    match re.captures(stem) {
        Some(caps) => format!(
            "{}_{}_{}_{}.csv",
            &caps["scen"], window.start, window.end, &caps["var"]
        ),
        None => format!("{}_{}_{}.csv", stem, window.start, window.end),
    }
}

/// 执行 interpolate 命令
pub fn execute(args: InterpolateArgs) -> Result<()> {
    output::print_header("Interpolating Projection Tables");

    if !args.input.exists() {
        return Err(SspGridError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let window = args.options.window.window()?;
    let id_columns = parse_id_columns(&args.id_columns);
    if id_columns.is_empty() {
        return Err(SspGridError::InvalidArgument(
            "--id-columns must name at least one column".to_string(),
        ));
    }

    output::print_window(window);
    output::print_info(&format!("Id columns [{}]", id_columns.join(", ")));

    if args.input.is_file() {
        execute_single(&args, window, id_columns)
    } else {
        execute_batch(&args, window, id_columns)
    }
}

/// 单文件模式
fn execute_single(args: &InterpolateArgs, window: YearWindow, id_columns: Vec<String>) -> Result<()> {
    let output_path = match &args.output {
        Some(p) => p.clone(),
        None => {
            let dir = args.input.parent().unwrap_or_else(|| Path::new(""));
            dir.join(default_output_name(&args.input, window))
        }
    };

    let mut job = InterpolationJob::from_options(
        args.input.clone(),
        output_path.clone(),
        &args.options,
        window,
    );
    job.id_columns = id_columns;
    job.prefix = args.prefix.clone();
    job.expect_rows = args.expect_rows;

    let table = interpolate_file(&job)?;

    output::print_info(&format!(
        "Anchor years: {}",
        table
            .anchor_years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    output::print_written(&args.input, &output_path);

    if let Some(plot_path) = &args.plot {
        let title = format!("{} column totals {}", table.prefix.trim_end_matches('_'), window);
        export::plot::generate_totals_plot(&table, plot_path, &title)?;
        output::print_success(&format!("Totals plot saved to '{}'", plot_path.display()));
    }

    output::print_done(&format!(
        "{} rows x {} years written",
        table.rows.len(),
        table.years.len()
    ));
    Ok(())
}

/// 目录批处理模式
fn execute_batch(args: &InterpolateArgs, window: YearWindow, id_columns: Vec<String>) -> Result<()> {
    if args.output.is_some() {
        output::print_warning("--output is ignored for directory input; use --output-dir.");
    }
    if args.plot.is_some() {
        output::print_warning("--plot is only supported for single-file input.");
    }

    // 排除已生成的输出
    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .with_exclude(&format!("*_{}_{}*.csv,Extracted_data_*", window.start, window.end))?
        .recursive(args.recursive);
    let files = collector.collect();

    if files.is_empty() {
        return Err(SspGridError::NoFilesFound {
            pattern: format!("{}/{}", args.input.display(), args.pattern),
        });
    }

    output::print_info(&format!("Found {} projection files", files.len()));

    let output_dir = args.output_dir.clone().unwrap_or_else(|| args.input.clone());
    std::fs::create_dir_all(&output_dir).map_err(|e| SspGridError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    // 文件级并行，行级串行
    let mut template = InterpolationJob::from_options(
        PathBuf::new(),
        PathBuf::new(),
        &args.options,
        window,
    );
    template.id_columns = id_columns;
    template.prefix = args.prefix.clone();
    template.expect_rows = args.expect_rows;
    template.densify.jobs = 1;
    template.densify.show_progress = false;

    let overwrite = args.overwrite;
    let runner = BatchRunner::new(args.options.jobs);
    let result = runner.run(files, |input| {
        let output_path = output_dir.join(default_output_name(input, window));
        if output_path.exists() && !overwrite {
            return ProcessResult::Skipped(format!(
                "{} exists (use --overwrite)",
                output_path.display()
            ));
        }

        let mut job = template.clone();
        job.input = input.clone();
        job.output = output_path.clone();

        match interpolate_file(&job) {
            Ok(table) => ProcessResult::Success(format!(
                "{} -> {} ({} rows)",
                input.display(),
                output_path.display(),
                table.rows.len()
            )),
            Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
        }
    })?;

    for msg in &result.messages {
        log::debug!("{}", msg);
    }

    output::print_separator();
    output::print_success(&format!(
        "Processed {} files: {} succeeded, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const POP: &str = "\
OBJECTID,Shape_Area,cell,gID,ISO3,p2_1980,p2_1990,p2_2000,p2_2010,p2_2020,p2_2030
0,1.0,a,11,AFG,100,200,300,400,500,600
1,1.0,b,12,AFG,,50,60,70,80,90
";

    #[test]
    fn test_default_output_name() {
        let w = YearWindow::default();
        assert_eq!(
            default_output_name(Path::new("data/pop_ssp2.csv"), w),
            "ssp2_1980_2016_pop.csv"
        );
        assert_eq!(
            default_output_name(Path::new("gdp_SSP3.csv"), w),
            "SSP3_1980_2016_gdp.csv"
        );
        assert_eq!(
            default_output_name(Path::new("table.csv"), w),
            "table_1980_2016.csv"
        );
    }

    #[test]
    fn test_interpolate_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pop_ssp2.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, POP).unwrap();

        let options = InterpolationArgs {
            window: crate::cli::WindowArgs {
                start: 1980,
                end: 2016,
            },
            use_outer_anchors: false,
            no_index: false,
            jobs: 1,
        };
        let mut job =
            InterpolationJob::from_options(input, output.clone(), &options, YearWindow::default());
        job.densify.show_progress = false;

        let table = interpolate_file(&job).unwrap();
        assert_eq!(table.anchor_years, vec![1980, 1990, 2000, 2010]);

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Vec<&str> = lines[0].split(',').collect();
        assert_eq!(header.len(), 1 + 37 + 2);
        assert_eq!(header[0], "");
        assert_eq!(header[1], "p2_1980");
        assert_eq!(header[37], "p2_2016");
        assert_eq!(&header[38..], ["ISO3", "gID"]);

        let row0: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(row0[0], "0");
        assert_eq!(row0[1], "100.0");
        assert_eq!(row0[6], "150.0");
        assert_eq!(row0[31], "400.0");
        assert_eq!(row0[37], "400.0");
        assert_eq!(&row0[38..], ["AFG", "11"]);

        // 1980 缺失：1980-1989 保持为空
        let row1: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(row1[1], "");
        assert_eq!(row1[10], "");
        assert_eq!(row1[11], "50.0");
        assert_eq!(row1[12], "51.0");
    }

    #[test]
    fn test_row_count_check() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pop_ssp2.csv");
        fs::write(&input, POP).unwrap();

        let options = InterpolationArgs {
            window: crate::cli::WindowArgs {
                start: 1980,
                end: 2016,
            },
            use_outer_anchors: true,
            no_index: true,
            jobs: 1,
        };
        let mut job = InterpolationJob::from_options(
            input,
            dir.path().join("out.csv"),
            &options,
            YearWindow::default(),
        );
        job.densify.show_progress = false;
        job.expect_rows = Some(75227);

        match interpolate_file(&job) {
            Err(SspGridError::RowCountMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 75227);
                assert_eq!(found, 2);
            }
            other => panic!("expected row count mismatch, got {:?}", other.map(|t| t.rows.len())),
        }

        job.expect_rows = Some(2);
        let table = interpolate_file(&job).unwrap();
        // 外侧锚点 2020：2016 = 400 + 6 * 10
        assert!((table.rows[0].values[36] - 460.0).abs() < 1e-9);
    }
}
