//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `input`: 生成网格程序输入文件（单文件或批量）
//! - `run`: 完整运行网格步骤
//! - `parse`: 解析已有的网格程序输出
//! - `describe`: 显示步骤说明
//! - `params`: 列出参数或导出默认参数文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: input, run, parse, describe, params

pub mod describe;
pub mod input;
pub mod params;
pub mod parse;
pub mod run;

use clap::{Parser, Subcommand};

/// amogrid - AMO 分子积分网格工具
#[derive(Parser)]
#[command(name = "amogrid")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Set up, run and analyze AMO molecular integration grids", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Write the grid program input file for one structure or a directory of structures
    Input(input::InputArgs),

    /// Generate the input, run the grid program and store its results
    Run(run::RunArgs),

    /// Parse an existing grid program report (output.dat)
    Parse(parse::ParseArgs),

    /// Describe what a grid step with the given parameters will do
    Describe(describe::DescribeArgs),

    /// List the grid parameters or dump them as a TOML parameter file
    Params(params::ParamsArgs),
}
