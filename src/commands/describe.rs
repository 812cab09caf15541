//! # describe 命令实现
//!
//! 显示给定参数下网格步骤将做什么。
//!
//! ## 依赖关系
//! - 使用 `cli/describe.rs` 定义的参数
//! - 使用 `step/description.rs`

use crate::cli::describe::DescribeArgs;
use crate::error::Result;
use crate::models::GridParameters;
use crate::step::description_text;
use crate::utils::output;

/// 执行 describe 命令
pub fn execute(args: DescribeArgs) -> Result<()> {
    let params = GridParameters::load(args.params.as_deref())?;

    output::print_header("AMO Grid");
    for paragraph in description_text(&params).split("\n\n") {
        println!("{}\n", paragraph);
    }

    Ok(())
}
