//! # 时间轴解码
//!
//! 按 CF 约定的 `units` 属性（如 `years since 1901-1-1 00:00:00`）
//! 将时间坐标换算为日历年。
//!
//! ## 支持单位
//! - `years` / `months`: 按整年、整月累加
//! - `days` / `hours` / `seconds`: 经 `chrono` 做日期运算
//!
//! 没有可用的 `units` 时，第 0 个时间步记为 `first_year`，之后逐年递增。
//!
//! ## 依赖关系
//! - 被 `parsers/grid.rs` 使用
//! - 使用 `regex`, `chrono`

use crate::error::{Result, SspGridError};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// 时间单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Years,
    Months,
    Days,
    Hours,
    Seconds,
}

impl TimeUnit {
    fn seconds_per_unit(self) -> Option<f64> {
        match self {
            TimeUnit::Days => Some(86_400.0),
            TimeUnit::Hours => Some(3_600.0),
            TimeUnit::Seconds => Some(1.0),
            TimeUnit::Years | TimeUnit::Months => None,
        }
    }
}

/// 解析后的 `units` 属性
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    pub unit: TimeUnit,
    pub reference: NaiveDateTime,
}

/// 解析 `"<unit> since <date>[ <time>]"`
pub fn parse_time_units(units: &str) -> Option<TimeUnits> {
    let re = Regex::new(
        r"(?i)^\s*(?P<unit>years?|months?|days?|hours?|seconds?)\s+since\s+(?P<y>-?\d{1,4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})(?:[ T](?P<hh>\d{1,2}):(?P<mm>\d{1,2})(?::(?P<ss>\d{1,2}))?)?",
    )
    .unwrap();
    let caps = re.captures(units)?;

    let unit = match caps["unit"].to_lowercase().trim_end_matches('s') {
        "year" => TimeUnit::Years,
        "month" => TimeUnit::Months,
        "day" => TimeUnit::Days,
        "hour" => TimeUnit::Hours,
        "second" => TimeUnit::Seconds,
        _ => return None,
    };

    let num = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
    let date = NaiveDate::from_ymd_opt(caps["y"].parse().ok()?, num("m")?, num("d")?)?;
    let time = NaiveTime::from_hms_opt(
        num("hh").unwrap_or(0),
        num("mm").unwrap_or(0),
        num("ss").unwrap_or(0),
    )?;

    Some(TimeUnits {
        unit,
        reference: NaiveDateTime::new(date, time),
    })
}

/// 单个时间坐标值对应的日历年
pub fn year_of(value: f64, units: &TimeUnits) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let reference = units.reference;
    match units.unit {
        TimeUnit::Years => Some(reference.year() + value.floor() as i32),
        TimeUnit::Months => {
            let total = reference.month0() as i64 + value.floor() as i64;
            Some(reference.year() + total.div_euclid(12) as i32)
        }
        unit => {
            let secs = (value * unit.seconds_per_unit()?).round() as i64;
            reference
                .checked_add_signed(chrono::Duration::seconds(secs))
                .map(|dt| dt.year())
        }
    }
}

/// 将整条时间轴换算为日历年
pub fn decode_years(values: &[f64], units: Option<&str>, first_year: i32) -> Result<Vec<i32>> {
    let parsed = units.and_then(parse_time_units);

    match parsed {
        Some(u) => values
            .iter()
            .map(|&v| {
                year_of(v, &u).ok_or_else(|| {
                    SspGridError::InvalidFormat(format!("time value {} out of range", v))
                })
            })
            .collect(),
        None => {
            log::warn!(
                "time units {:?} not recognised, numbering steps from {}",
                units,
                first_year
            );
            Ok((0..values.len() as i32).map(|i| first_year + i).collect())
        }
    }
}
