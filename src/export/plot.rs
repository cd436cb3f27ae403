//! # 年度合计图
//!
//! 绘制插值后各年份的列合计，并标出锚点年份，用于快速目视检查。
//!
//! ## 依赖关系
//! - 被 `commands/interpolate.rs` 调用
//! - 使用 `models/projection.rs` 的 DensifiedTable
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SspGridError};
use crate::models::DensifiedTable;

use plotters::prelude::*;
use std::path::Path;

/// 生成年度合计图（扩展名为 .svg 时输出 SVG，否则 PNG）
pub fn generate_totals_plot(table: &DensifiedTable, output_path: &Path, title: &str) -> Result<()> {
    let use_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if use_svg {
        let root = SVGBackend::new(output_path, (900, 600)).into_drawing_area();
        draw_totals_chart(&root, table, title)?;
        root.present()
            .map_err(|e| SspGridError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
        draw_totals_chart(&root, table, title)?;
        root.present()
            .map_err(|e| SspGridError::Other(e.to_string()))?;
    }
    Ok(())
}

fn draw_totals_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &DensifiedTable,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let totals = table.column_totals();
    if totals.is_empty() {
        return Err(SspGridError::Other("No data to plot".to_string()));
    }

    root.fill(&WHITE)
        .map_err(|e| SspGridError::Other(format!("{:?}", e)))?;

    let x_min = totals.first().map(|(y, _)| *y).unwrap_or(0);
    let x_max = totals.last().map(|(y, _)| *y).unwrap_or(0);
    let y_min = totals.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let y_max = totals.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let y_margin = ((y_max - y_min).abs() * 0.1).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (x_min - 1)..(x_max + 1),
            (y_min - y_margin)..(y_max + y_margin),
        )
        .map_err(|e| SspGridError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Column total")
        .draw()
        .map_err(|e| SspGridError::Other(format!("{:?}", e)))?;

    chart
        .draw_series(LineSeries::new(totals.iter().copied(), BLUE.stroke_width(2)))
        .map_err(|e| SspGridError::Other(format!("{:?}", e)))?
        .label("Interpolated")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    // 锚点年份
    chart
        .draw_series(
            totals
                .iter()
                .filter(|(year, _)| table.anchor_years.contains(year))
                .map(|&(year, v)| Circle::new((year, v), 5, RED.filled())),
        )
        .map_err(|e| SspGridError::Other(format!("{:?}", e)))?
        .label("Anchor year")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| SspGridError::Other(format!("{:?}", e)))?;

    Ok(())
}
