//! # input 命令实现
//!
//! 由结构文件生成 amo_grid 输入文件。
//!
//! ## 功能
//! - 单文件模式：写出 `<结构名>.in`，或用 `--stdout` 直接打印
//! - 批量模式：目录中所有匹配的结构文件并行生成输入，
//!   子目录结构在输出目录中保留（`a/x.xyz` -> `<out>/a/x.in`）
//!
//! ## 依赖关系
//! - 使用 `cli/input.rs` 定义的参数
//! - 使用 `formatters/`, `step/source.rs`
//! - 使用 `batch/` 进行批量处理

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::input::InputArgs;
use crate::error::{AmoGridError, Result};
use crate::formatters::format_input;
use crate::models::GridParameters;
use crate::step::{StructureFile, StructureSource};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 批量模式默认输出目录
const DEFAULT_BATCH_DIR: &str = "grid_inputs";

/// 执行 input 命令
pub fn execute(args: InputArgs) -> Result<()> {
    let params = GridParameters::load(args.params.as_deref())?;

    if args.input.is_file() {
        execute_single_file(&args, &params)
    } else if args.input.is_dir() {
        execute_batch(&args, &params)
    } else {
        Err(AmoGridError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &InputArgs, params: &GridParameters) -> Result<()> {
    let molecule = StructureFile::new(&args.input).molecule()?;
    let text = format_input(params, &molecule)?;

    if args.stdout {
        println!("{}", text);
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("in"));

    if output_path.exists() && !args.overwrite {
        output::print_warning(&format!(
            "'{}' already exists, use --overwrite to replace it",
            output_path.display()
        ));
        return Ok(());
    }

    write_input(&output_path, &text)?;
    output::print_written(
        &args.input.display().to_string(),
        &output_path.display().to_string(),
    );
    Ok(())
}

/// 批量模式
fn execute_batch(args: &InputArgs, params: &GridParameters) -> Result<()> {
    output::print_header("Generating grid inputs");

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BATCH_DIR));
    fs::create_dir_all(&output_dir).map_err(|e| AmoGridError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    output::print_info(&format!("Found {} structure file(s)", files.len()));

    let result = BatchRunner::new(args.jobs).run(files, |file| {
        process_batch_file(file, &args.input, &output_dir, params, args.overwrite)
    })?;

    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    output::print_done(&format!(
        "Processed {} file(s): wrote {} input file(s) to '{}' ({} skipped, {} failed)",
        result.total(),
        result.success,
        output_dir.display(),
        result.skipped,
        result.failed
    ));

    Ok(())
}

/// 批量文件对应的输出路径：`input_root` 下的相对目录在 `output_dir` 下保留
fn batch_output_path(input: &Path, input_root: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("structure");
    let relative_dir = input
        .parent()
        .and_then(|dir| dir.strip_prefix(input_root).ok())
        .unwrap_or_else(|| Path::new(""));

    output_dir.join(relative_dir).join(format!("{}.in", stem))
}

/// 处理单个批量文件
fn process_batch_file(
    input: &Path,
    input_root: &Path,
    output_dir: &Path,
    params: &GridParameters,
    overwrite: bool,
) -> ProcessResult {
    let name = input.display().to_string();
    let output_path = batch_output_path(input, input_root, output_dir);

    if output_path.exists() && !overwrite {
        return ProcessResult::Skipped(name);
    }

    let result = StructureFile::new(input)
        .molecule()
        .and_then(|molecule| format_input(params, &molecule))
        .and_then(|text| {
            if let Some(dir) = output_path.parent() {
                fs::create_dir_all(dir).map_err(|e| AmoGridError::FileWriteError {
                    path: dir.display().to_string(),
                    source: e,
                })?;
            }
            write_input(&output_path, &text)
        });

    match result {
        Ok(()) => ProcessResult::Success(name),
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

/// 与 `run` 写出的 input.in 逐字节相同
fn write_input(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| AmoGridError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
