//! # AMO 网格步骤
//!
//! 一次完整的网格计算：取得结构 -> 生成输入 -> 运行 amo_grid -> 解析输出 -> 保存结果。
//!
//! ## 工作目录中的文件
//! - `input.in`   网格程序输入
//! - `output.dat` 网格程序报告
//! - `structure.xyz` 计算所用的结构
//! - `stderr.txt` 网格程序的标准错误输出（非空时）
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/parse.rs` 使用
//! - 使用 `formatters/`, `parsers/grid_output.rs`, `utils/output.rs`
//! - 子模块: source, executor, sink, description

pub mod description;
pub mod executor;
pub mod sink;
pub mod source;

pub use description::description_text;
pub use executor::{ExecutionOutput, ExecutionRequest, LocalExecutor, ProcessExecutor};
pub use sink::{ResultSink, ResultTable, WorkspaceSink};
pub use source::{StructureFile, StructureSource};

use crate::error::{AmoGridError, Result};
use crate::formatters::format_input;
use crate::models::{properties, GridParameters, ResultRecord};
use crate::parsers::{grid_output, xyz};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 默认网格程序
pub const DEFAULT_PROGRAM: &str = "amo_grid";
pub const INPUT_FILE: &str = "input.in";
pub const OUTPUT_FILE: &str = "output.dat";
pub const STDERR_FILE: &str = "stderr.txt";
pub const STRUCTURE_FILE: &str = "structure.xyz";

/// AMO 网格步骤
#[derive(Debug, Clone)]
pub struct AmoGridStep {
    pub parameters: GridParameters,
    /// 步骤工作目录
    pub directory: PathBuf,
    /// 网格程序可执行文件
    pub program: String,
}

impl AmoGridStep {
    pub fn new(parameters: GridParameters, directory: impl Into<PathBuf>) -> Self {
        AmoGridStep {
            parameters,
            directory: directory.into(),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// 本步骤将做什么
    pub fn description(&self) -> String {
        description_text(&self.parameters)
    }

    /// 生成网格程序的输入文本
    pub fn get_input(&self, source: &dyn StructureSource) -> Result<String> {
        let molecule = source.molecule()?;
        format_input(&self.parameters, &molecule)
    }

    /// 运行整个步骤并返回解析出的结果
    pub fn run(
        &self,
        source: &dyn StructureSource,
        executor: &dyn ProcessExecutor,
        sink: &mut dyn ResultSink,
    ) -> Result<ResultRecord> {
        let molecule = source.molecule()?;
        let input = format_input(&self.parameters, &molecule)?;

        fs::create_dir_all(&self.directory).map_err(|e| AmoGridError::FileWriteError {
            path: self.directory.display().to_string(),
            source: e,
        })?;
        write_file(&self.directory.join(INPUT_FILE), &input)?;
        write_file(
            &self.directory.join(STRUCTURE_FILE),
            &xyz::to_xyz_string(&molecule),
        )?;

        let request = ExecutionRequest {
            command: vec![self.program.clone(), INPUT_FILE.to_string()],
            files: vec![(INPUT_FILE.to_string(), input)],
            return_files: vec![OUTPUT_FILE.to_string()],
            workdir: self.directory.clone(),
        };
        let result = executor.execute(&request)?;

        if !result.stderr.is_empty() {
            output::print_warning(&format!("stderr:\n{}", result.stderr.trim_end()));
            write_file(&self.directory.join(STDERR_FILE), &result.stderr)?;
        }

        for file in &result.files {
            let content = match &file.data {
                Ok(data) => data,
                Err(reason) => reason,
            };
            write_file(&self.directory.join(&file.name), content)?;
        }

        if !result.success {
            // 程序没有写 stderr 时用 stdout 说明失败原因
            let detail = if result.stderr.trim().is_empty() {
                &result.stdout
            } else {
                &result.stderr
            };
            return Err(AmoGridError::CommandFailed {
                command: request.command_line(),
                stderr: match result.exit_code {
                    Some(code) => format!("exit status {}\n{}", code, detail),
                    None => format!("terminated by signal\n{}", detail),
                },
            });
        }

        if let Some(Err(reason)) = result
            .files
            .iter()
            .find(|f| f.name == OUTPUT_FILE)
            .map(|f| &f.data)
        {
            return Err(AmoGridError::CommandFailed {
                command: request.command_line(),
                stderr: format!("no {} produced: {}", OUTPUT_FILE, reason),
            });
        }

        self.analyze(sink)
    }

    /// 解析工作目录中的 output.dat 并保存请求的结果
    pub fn analyze(&self, sink: &mut dyn ResultSink) -> Result<ResultRecord> {
        // 多余的 percent diff 保留在 unassigned_tests 中，由调用方报告
        let record = grid_output::parse_output_file(&self.directory.join(OUTPUT_FILE))?;

        sink.store_results(
            &record.data(),
            &properties(),
            &self.parameters.results,
            self.parameters.create_tables,
        )?;

        Ok(record)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| AmoGridError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
