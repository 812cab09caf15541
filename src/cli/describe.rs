//! # describe 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/describe.rs`

use clap::Args;
use std::path::PathBuf;

/// describe 子命令参数
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// TOML parameter file (defaults are used for missing values)
    #[arg(short, long)]
    pub params: Option<PathBuf>,
}
