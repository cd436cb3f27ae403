//! # 终端输出
//!
//! 统一的彩色输出。警告和错误写到 stderr，便于把 stdout 重定向到日志。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::models::YearWindow;

use colored::Colorize;
use std::path::Path;

const RULE_WIDTH: usize = 60;

pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 流水线步骤，如 `[2/3] GDP: gdp_ssp2.csv`
pub fn print_step(index: usize, total: usize, label: &str, detail: &str) {
    println!(
        "{} {}: {}",
        format!("[{}/{}]", index, total).cyan().bold(),
        label.bold(),
        detail
    );
}

/// 输入文件 -> 输出文件
pub fn print_written(input: &Path, output: &Path) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        input.display().to_string().dimmed(),
        "->".cyan(),
        output.display()
    );
}

/// 打印本次处理的年份窗口
pub fn print_window(window: YearWindow) {
    println!(
        "{} years {} ({} columns)",
        "[*]".blue().bold(),
        window.to_string().bold(),
        window.len()
    );
}

pub fn print_header(title: &str) {
    let line = "─".repeat(RULE_WIDTH);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}
