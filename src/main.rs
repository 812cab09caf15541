//! # amogrid - AMO 分子积分网格工具
//!
//! 为 AMO 散射计算准备网格程序 (amo_grid) 的输入、运行程序并解析其报告。
//!
//! ## 子命令
//! - `input`    - 由结构文件生成网格输入（单文件或批量）
//! - `run`      - 生成输入、运行网格程序、保存结果
//! - `parse`    - 解析已有的 output.dat
//! - `describe` - 显示步骤说明
//! - `params`   - 列出参数或导出 TOML 参数文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── step/       (网格步骤：结构来源、执行器、结果存储)
//!   │     ├── formatters/ (输入文件生成)
//!   │     ├── parsers/    (结构与报告解析)
//!   │     ├── batch/      (批量处理)
//!   │     └── models/     (数据模型)
//!   ├── utils/      (终端输出)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod formatters;
mod models;
mod parsers;
mod step;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
