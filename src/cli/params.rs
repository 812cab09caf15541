//! # params 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/params.rs`

use clap::Args;
use std::path::PathBuf;

/// params 子命令参数
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// TOML parameter file to show (defaults if omitted)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Print a complete TOML parameter file instead of the table
    #[arg(long, default_value_t = false)]
    pub toml: bool,

    /// Write the TOML parameter file to this path
    #[arg(short, long, requires = "toml")]
    pub output: Option<PathBuf>,
}
