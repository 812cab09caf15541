//! # parse 子命令 CLI 定义
//!
//! 解析已有的 amo_grid 输出文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/parse.rs`

use clap::Args;
use std::path::PathBuf;

/// parse 子命令参数
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Grid program report (output.dat)
    pub report: PathBuf,

    /// TOML parameter file with the requested results
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Store the requested results into variables and tables
    #[arg(long, default_value_t = false)]
    pub store: bool,

    /// Directory holding result variables and tables
    #[arg(long, default_value = ".")]
    pub tables_dir: PathBuf,
}
