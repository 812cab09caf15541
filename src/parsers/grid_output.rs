//! # amo_grid 输出解析器
//!
//! 解析网格程序的文本报告 output.dat，提取网格大小与积分测试误差。
//!
//! ## 识别的行
//! ```text
//!   center grid points:        12345
//!   number of points per interval:   20
//!   total angular numbers of points:   16
//!   percent diff:  1.2e-4          (依次为 Sphere / Yukawa / Gaussian)
//! ```
//! 逐行按文件顺序处理；原子网格大小 = 每区间点数 × 角向总点数。
//!
//! ## 依赖关系
//! - 被 `step/mod.rs`, `commands/parse.rs` 使用
//! - 使用 `models/results.rs`

use crate::error::{AmoGridError, Result};
use crate::models::ResultRecord;
use std::fs;
use std::path::Path;

const CENTER_POINTS: &str = "center grid points:";
const POINTS_PER_INTERVAL: &str = "number of points per interval:";
const ANGULAR_POINTS: &str = "total angular numbers of points:";
const PERCENT_DIFF: &str = "percent diff:";

/// 解析 output.dat 文件
pub fn parse_output_file(path: &Path) -> Result<ResultRecord> {
    let content = fs::read_to_string(path).map_err(|e| AmoGridError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_output(&content)
}

/// 从字符串内容解析网格程序报告
///
/// 缺少 `center grid points:` 行、数值无法解析、或角向点数行出现在
/// 每区间点数行之前时返回 [`AmoGridError::MalformedOutput`]。
/// 其余结果缺失时对应字段保持 `None`。
pub fn parse_output(content: &str) -> Result<ResultRecord> {
    let mut record = ResultRecord::new();
    let mut n_radial: Option<i64> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.contains(CENTER_POINTS) {
            record.central_grid_size = Some(last_number(line, line_no)?);
        }

        if line.contains(POINTS_PER_INTERVAL) {
            n_radial = Some(last_number(line, line_no)?);
        }

        if line.contains(ANGULAR_POINTS) {
            let n_angular: i64 = last_number(line, line_no)?;
            let n_radial = n_radial.ok_or_else(|| AmoGridError::MalformedOutput {
                line: line_no,
                reason: format!(
                    "'{}' appears before any '{}' line",
                    ANGULAR_POINTS, POINTS_PER_INTERVAL
                ),
            })?;
            let size = n_radial
                .checked_mul(n_angular)
                .ok_or_else(|| AmoGridError::MalformedOutput {
                    line: line_no,
                    reason: format!(
                        "atomic grid size {} x {} does not fit in an integer",
                        n_radial, n_angular
                    ),
                })?;
            record.atomic_grid_size = Some(size);
        }

        if line.contains(PERCENT_DIFF) {
            let value: f64 = last_number(line, line_no)?;
            record.push_test(value);
        }
    }

    if record.central_grid_size.is_none() {
        return Err(AmoGridError::MalformedOutput {
            line: content.lines().count(),
            reason: format!("no '{}' line found", CENTER_POINTS),
        });
    }

    Ok(record)
}

/// 行内最后一个可解析为目标类型的词
fn last_number<T: std::str::FromStr>(line: &str, line_no: usize) -> Result<T> {
    line.split_whitespace()
        .rev()
        .find_map(|w| w.parse::<T>().ok())
        .ok_or_else(|| AmoGridError::MalformedOutput {
            line: line_no,
            reason: format!(
                "expected a {} in '{}'",
                std::any::type_name::<T>(),
                line
            ),
        })
}
