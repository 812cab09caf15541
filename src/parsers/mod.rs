//! # 解析器模块
//!
//! 提供分子结构文件与网格程序输出的解析器。
//!
//! ## 依赖关系
//! - 被 `step/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: xyz, grid_output

pub mod grid_output;
pub mod xyz;

use crate::error::{AmoGridError, Result};
use crate::models::Molecule;
use std::path::Path;

/// 从文件路径推断格式并解析分子结构
pub fn parse_structure_file(path: &Path) -> Result<Molecule> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xyz" => xyz::parse_xyz_file(path),
        _ => Err(AmoGridError::UnsupportedFormat(format!(
            "Cannot determine structure format for: {}",
            path.display()
        ))),
    }
}
