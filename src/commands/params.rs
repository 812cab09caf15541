//! # params 命令实现
//!
//! 列出网格参数（名称、当前值、可选值、说明），或导出完整的 TOML 参数文件。
//!
//! ## 依赖关系
//! - 使用 `cli/params.rs` 定义的参数
//! - 使用 `models/parameters.rs`

use crate::cli::params::ParamsArgs;
use crate::error::{AmoGridError, Result};
use crate::models::GridParameters;
use crate::utils::output;

use std::fs;
use tabled::{Table, Tabled};

/// 参数表格行
#[derive(Debug, Clone, Tabled)]
struct ParamRow {
    #[tabled(rename = "Parameter")]
    key: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Choices")]
    choices: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// 执行 params 命令
pub fn execute(args: ParamsArgs) -> Result<()> {
    let params = GridParameters::load(args.params.as_deref())?;

    if args.toml {
        let text = params.to_toml_string()?;
        match &args.output {
            Some(path) => {
                fs::write(path, &text).map_err(|e| AmoGridError::FileWriteError {
                    path: path.display().to_string(),
                    source: e,
                })?;
                output::print_success(&format!(
                    "Parameter file written to '{}'",
                    path.display()
                ));
            }
            None => print!("{}", text),
        }
        return Ok(());
    }

    let rows: Vec<ParamRow> = params
        .schema()
        .into_iter()
        .map(|info| ParamRow {
            key: info.key,
            kind: info.kind.to_string(),
            value: info.value,
            units: info.units.to_string(),
            choices: info.choices,
            description: info.description.to_string(),
        })
        .collect();

    output::print_header("AMO Grid Parameters");
    println!("{}", Table::new(&rows));

    if !params.results.is_empty() {
        output::print_separator();
        for (name, request) in &params.results {
            let mut targets = Vec::new();
            if let Some(v) = &request.variable {
                targets.push(format!("variable '{}'", v));
            }
            if let Some(t) = &request.table {
                targets.push(format!(
                    "table '{}' column '{}'",
                    t,
                    request.column.as_deref().unwrap_or(name.as_str())
                ));
            }
            output::print_info(&format!("{} -> {}", name, targets.join(", ")));
        }
    }

    Ok(())
}
