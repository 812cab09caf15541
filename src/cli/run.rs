//! # run 子命令 CLI 定义
//!
//! 完整运行 AMO 网格步骤：生成输入、调用网格程序、解析并保存结果
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Structure file (.xyz)
    pub structure: PathBuf,

    /// TOML parameter file (defaults are used for missing values)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Working directory for input.in, output.dat and stderr.txt
    #[arg(short, long, default_value = "amo_grid")]
    pub workdir: PathBuf,

    /// Grid generation executable
    #[arg(long, env = "AMO_GRID_EXE", default_value = "amo_grid")]
    pub program: String,

    /// Directory holding result variables and tables (default: the working directory)
    #[arg(long)]
    pub tables_dir: Option<PathBuf>,

    /// Print the generated input before running
    #[arg(long, default_value_t = false)]
    pub show_input: bool,
}
