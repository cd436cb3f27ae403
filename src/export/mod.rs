//! # 数据导出模块
//!
//! 将插值结果与网格融化结果写出为 CSV，并可选绘制年度合计图。
//!
//! ## 数值格式
//! - NaN 输出为空单元格
//! - 整数值保留一位小数 (`1000.0`)
//! - 其余使用最短往返表示
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 子模块: projection, grid, plot

pub mod grid;
pub mod plot;
pub mod projection;

/// 格式化 f64 单元格
pub fn format_f64(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// 格式化 f32 单元格
pub fn format_f32(v: f32) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e7 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}
