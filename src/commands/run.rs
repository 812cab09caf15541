//! # run 命令实现
//!
//! 完整运行 AMO 网格步骤。
//!
//! ## 功能
//! - 读取结构与参数
//! - 生成 input.in 并调用网格程序
//! - 解析 output.dat，保存请求的结果
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `step/`, `utils/output.rs`

use crate::cli::run::RunArgs;
use crate::error::Result;
use crate::models::GridParameters;
use crate::step::{
    AmoGridStep, LocalExecutor, StructureFile, StructureSource, WorkspaceSink, OUTPUT_FILE,
};
use crate::utils::output;

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("AMO Grid");

    let params = GridParameters::load(args.params.as_deref())?;
    let step = AmoGridStep::new(params, &args.workdir).with_program(&args.program);
    let molecule = StructureFile::new(&args.structure).molecule()?;

    output::print_info(&format!(
        "Structure '{}': {} ({} atoms)",
        molecule.name,
        molecule.formula(),
        molecule.len()
    ));
    output::print_block(&step.description());
    println!();

    if args.show_input {
        output::print_header("Grid Program Input");
        output::print_block(&step.get_input(&molecule)?);
        println!();
    }

    let tables_dir = args
        .tables_dir
        .clone()
        .unwrap_or_else(|| args.workdir.clone());
    let mut sink = WorkspaceSink::new(tables_dir);

    output::print_info(&format!(
        "Running '{} input.in' in '{}'",
        step.program,
        step.directory.display()
    ));
    let record = step.run(&molecule, &LocalExecutor, &mut sink)?;
    output::print_success(&format!(
        "Grid program finished, report in '{}'",
        step.directory.join(OUTPUT_FILE).display()
    ));

    super::print_results(&record);
    super::print_variables(&sink);

    for path in sink.save()? {
        output::print_success(&format!("Saved '{}'", path.display()));
    }

    output::print_done("AMO grid step complete");
    Ok(())
}
