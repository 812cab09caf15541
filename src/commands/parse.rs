//! # parse 命令实现
//!
//! 解析已有的 amo_grid 报告，显示结果并可选保存到变量/表格。
//!
//! ## 依赖关系
//! - 使用 `cli/parse.rs` 定义的参数
//! - 使用 `parsers/grid_output.rs`, `step/sink.rs`

use crate::cli::parse::ParseArgs;
use crate::error::{AmoGridError, Result};
use crate::models::{properties, GridParameters};
use crate::parsers::grid_output;
use crate::step::{ResultSink, WorkspaceSink};
use crate::utils::output;

/// 执行 parse 命令
pub fn execute(args: ParseArgs) -> Result<()> {
    if !args.report.exists() {
        return Err(AmoGridError::FileNotFound {
            path: args.report.display().to_string(),
        });
    }

    let params = GridParameters::load(args.params.as_deref())?;
    let record = grid_output::parse_output_file(&args.report)?;

    super::print_results(&record);

    if args.store {
        if params.results.is_empty() {
            output::print_warning("No results requested in the parameter file, nothing stored.");
            return Ok(());
        }

        let mut sink = WorkspaceSink::new(&args.tables_dir);
        sink.store_results(
            &record.data(),
            &properties(),
            &params.results,
            params.create_tables,
        )?;
        super::print_variables(&sink);
        for path in sink.save()? {
            output::print_success(&format!("Saved '{}'", path.display()));
        }
    }

    Ok(())
}
