//! # run 命令实现
//!
//! 在数据目录中执行完整的 SSP2 数据准备流程：
//! 1. 切换工作目录（失败仅提示，继续在当前目录执行）
//! 2. `pop_ssp2.csv` -> `ssp2_<start>_<end>_pop.csv`
//! 3. `gdp_ssp2.csv` -> `ssp2_<start>_<end>_GDP.csv`
//! 4. WaterGAP `pdomww` -> `Extracted_data_pdomww_<start>-<end>.csv`
//!
//! 除第 1 步外，任何失败都会终止执行。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `commands/interpolate.rs`, `commands/extract.rs`
//! - 使用 `utils/workdir.rs`, `utils/output.rs`
//! - 使用 `tabled` 输出汇总

use crate::cli::extract::Layout;
use crate::cli::run::RunArgs;
use crate::commands::extract::{self, extract_grid, grid_request};
use crate::commands::interpolate::{interpolate_file, InterpolationJob};
use crate::error::Result;
use crate::models::YearWindow;
use crate::utils::{output, workdir};

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

pub const POP_INPUT: &str = "pop_ssp2.csv";
pub const GDP_INPUT: &str = "gdp_ssp2.csv";
pub const GRID_INPUT: &str = "watergap_22d_WFDEI-GPCC_histsoc_pdomww_yearly_1901_2016.nc4";

/// 一个投影步骤
struct ProjectionStep {
    label: &'static str,
    input: &'static str,
    prefix: &'static str,
    suffix: &'static str,
}

const PROJECTION_STEPS: [ProjectionStep; 2] = [
    ProjectionStep {
        label: "Population",
        input: POP_INPUT,
        prefix: "p2_",
        suffix: "pop",
    },
    ProjectionStep {
        label: "GDP",
        input: GDP_INPUT,
        prefix: "g2_",
        suffix: "GDP",
    },
];

/// 投影输出文件名，如 `ssp2_1980_2016_pop.csv`
pub fn projection_output_name(suffix: &str, window: YearWindow) -> String {
    format!("ssp2_{}_{}_{}.csv", window.start, window.end, suffix)
}

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Output")]
    output: String,
    #[tabled(rename = "Rows")]
    rows: String,
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("SSP2 + WaterGAP Data Preparation");

    output::print_info(&format!(
        "Current working directory: {}",
        workdir::current_dir_display()
    ));

    if let Some(dir) = &args.workdir {
        match workdir::change_dir(dir) {
            Ok(cwd) => output::print_info(&format!("Current working directory: {}", cwd.display())),
            Err(failure) => output::print_warning(&failure.to_string()),
        }
    }

    let window = args.options.window.window()?;
    output::print_window(window);
    let total = PROJECTION_STEPS.len() + usize::from(!args.skip_grid);
    let mut summary: Vec<StepRow> = Vec::new();

    for (i, step) in PROJECTION_STEPS.iter().enumerate() {
        output::print_step(i + 1, total, step.label, step.input);

        let out = PathBuf::from(projection_output_name(step.suffix, window));
        let mut job =
            InterpolationJob::from_options(PathBuf::from(step.input), out.clone(), &args.options, window);
        job.prefix = Some(step.prefix.to_string());

        let table = interpolate_file(&job)?;
        output::print_written(Path::new(step.input), &out);

        summary.push(StepRow {
            step: step.label.to_string(),
            output: out.display().to_string(),
            rows: table.rows.len().to_string(),
        });
    }

    if args.skip_grid {
        output::print_skip("WaterGAP extraction (--skip-grid)");
    } else {
        output::print_step(
            total,
            total,
            "Water use",
            &format!("'{}' from {}", args.grid.variable, GRID_INPUT),
        );

        let req = grid_request(&args.grid, window);
        let out = PathBuf::from(extract::default_output_name(&req.variable, window));
        let melted = extract_grid(
            &PathBuf::from(GRID_INPUT),
            &out,
            &req,
            Layout::Wide,
            args.grid.drop_missing,
        )?;
        output::print_written(Path::new(GRID_INPUT), &out);

        summary.push(StepRow {
            step: format!("Water use ({})", req.variable),
            output: out.display().to_string(),
            rows: melted.cells_written.to_string(),
        });
    }

    output::print_header("Summary");
    println!("{}", Table::new(&summary));
    output::print_done(&format!("{} outputs written", summary.len()));

    Ok(())
}
