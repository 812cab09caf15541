//! # 格式生成模块
//!
//! 生成外部网格程序所需的输入文件。
//!
//! ## 依赖关系
//! - 被 `step/` 和 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: grid_input

pub mod grid_input;

pub use grid_input::format_input;
