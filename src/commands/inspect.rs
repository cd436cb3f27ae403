//! # inspect 命令实现
//!
//! 以表格列出 NetCDF 文件的变量、维度、形状与单位，
//! 并报告时间轴对应的年份范围。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/grid.rs`
//! - 使用 `tabled` 渲染表格

use crate::cli::inspect::InspectArgs;
use crate::error::Result;
use crate::parsers::grid::{self, VariableInfo};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 变量表行
#[derive(Debug, Clone, Tabled)]
struct VariableRow {
    #[tabled(rename = "Variable")]
    name: String,
    #[tabled(rename = "Dimensions")]
    dimensions: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Units")]
    units: String,
}

impl From<&VariableInfo> for VariableRow {
    fn from(info: &VariableInfo) -> Self {
        VariableRow {
            name: info.name.clone(),
            dimensions: info.dimensions.join(", "),
            shape: format!(
                "({})",
                info.shape
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            units: info.units.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header(&format!("Inspecting {}", args.input.display()));

    let infos = grid::describe_variables(&args.input)?;
    if infos.is_empty() {
        output::print_warning("No variables found.");
        return Ok(());
    }

    let rows: Vec<VariableRow> = infos.iter().map(VariableRow::from).collect();
    println!("{}", Table::new(&rows));

    if infos.iter().any(|v| v.name == args.time_var) {
        let file = grid::open_dataset(&args.input)?;
        let years = grid::read_time_years(&file, &args.time_var, args.first_year, &args.input)?;
        if let (Some(first), Some(last)) = (years.first(), years.last()) {
            output::print_info(&format!(
                "Time axis '{}': {} steps, {}-{}",
                args.time_var,
                years.len(),
                first,
                last
            ));
        }
    } else {
        output::print_warning(&format!("No time variable '{}' found.", args.time_var));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_row() {
        let info = VariableInfo {
            name: "pdomww".to_string(),
            dimensions: vec!["time".to_string(), "lat".to_string(), "lon".to_string()],
            shape: vec![116, 360, 720],
            units: Some("kg m-2 s-1".to_string()),
        };
        let row = VariableRow::from(&info);
        assert_eq!(row.dimensions, "time, lat, lon");
        assert_eq!(row.shape, "(116, 360, 720)");
        assert_eq!(row.units, "kg m-2 s-1");
    }
}
