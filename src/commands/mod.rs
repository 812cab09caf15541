//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `step/`, `formatters/`, `parsers/`, `models/`, `utils/`
//! - 子模块: input, run, parse, describe, params

pub mod describe;
pub mod input;
pub mod params;
pub mod parse;
pub mod run;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::{properties, ResultName, ResultRecord};
use crate::step::WorkspaceSink;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Input(args) => input::execute(args),
        Commands::Run(args) => run::execute(args),
        Commands::Parse(args) => parse::execute(args),
        Commands::Describe(args) => describe::execute(args),
        Commands::Params(args) => params::execute(args),
    }
}

/// 结果表格行
#[derive(Debug, Clone, Tabled)]
struct ResultRow {
    #[tabled(rename = "Result")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// 以表格形式打印网格程序结果，未解析到的结果显示为 "-"
pub(crate) fn print_results(record: &ResultRecord) {
    if record.is_empty() {
        output::print_warning("The grid program report contained no results");
        return;
    }

    let props = properties();
    let rows: Vec<ResultRow> = ResultName::ALL
        .iter()
        .map(|&name| {
            let spec = props.iter().find(|p| p.name == name);
            ResultRow {
                name: name.to_string(),
                value: record
                    .get(name)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                kind: spec
                    .map(|p| format!("{} {}", p.dimensionality, p.value_type))
                    .unwrap_or_default(),
                description: spec.map(|p| p.description.to_string()).unwrap_or_default(),
            }
        })
        .collect();

    output::print_header("AMO Grid Results");
    println!("{}", Table::new(&rows));

    if !record.unassigned_tests.is_empty() {
        output::print_warning(&format!(
            "{} extra 'percent diff' value(s) had no test to belong to: {:?}",
            record.unassigned_tests.len(),
            record.unassigned_tests
        ));
    }
}

/// 打印本次写入的变量
pub(crate) fn print_variables(sink: &WorkspaceSink) {
    for (name, value) in sink.variables() {
        output::print_info(&format!("{} = {}", name, value));
    }
}
