//! # input 子命令 CLI 定义
//!
//! 由结构文件生成 amo_grid 输入文件（单文件或批量目录）
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/input.rs`

use clap::Args;
use std::path::PathBuf;

/// input 子命令参数
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input: structure file (.xyz) or directory containing structure files
    pub input: PathBuf,

    /// Output: input file path (single mode) or directory (batch mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML parameter file (defaults are used for missing values)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Print the generated input to the terminal instead of writing a file (single mode)
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for structure files (batch mode, comma-separated)
    #[arg(long, default_value = "*.xyz")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
