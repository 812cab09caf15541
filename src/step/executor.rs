//! # 外部程序执行器
//!
//! 在工作目录中写入输入文件、运行外部程序并取回输出文件。
//!
//! ## 依赖关系
//! - 被 `step/mod.rs` 使用
//! - 使用 `std::process::Command`

use crate::error::{AmoGridError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 一次外部程序调用
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// 程序与参数
    pub command: Vec<String>,
    /// 运行前写入工作目录的文件 (文件名, 内容)
    pub files: Vec<(String, String)>,
    /// 运行后需要取回的文件名
    pub return_files: Vec<String>,
    /// 工作目录
    pub workdir: PathBuf,
}

impl ExecutionRequest {
    /// 命令行字符串（用于日志和错误信息）
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// 取回的文件：内容或读取失败的原因
#[derive(Debug, Clone)]
pub struct ReturnedFile {
    pub name: String,
    pub data: std::result::Result<String, String>,
}

/// 外部程序的运行结果
#[derive(Debug, Clone)]
pub struct ExecutionOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub files: Vec<ReturnedFile>,
}

/// 外部程序执行器
pub trait ProcessExecutor {
    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutput>;
}

/// 在本机直接运行
#[derive(Debug, Clone, Default)]
pub struct LocalExecutor;

impl ProcessExecutor for LocalExecutor {
    fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutput> {
        let (program, args) = request.command.split_first().ok_or_else(|| {
            AmoGridError::InvalidArgument("Empty command for external program".to_string())
        })?;

        fs::create_dir_all(&request.workdir).map_err(|e| AmoGridError::FileWriteError {
            path: request.workdir.display().to_string(),
            source: e,
        })?;

        for (name, content) in &request.files {
            let path = request.workdir.join(name);
            fs::write(&path, content).map_err(|e| AmoGridError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        let output = Command::new(program)
            .args(args)
            .current_dir(&request.workdir)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AmoGridError::CommandNotFound {
                    command: program.clone(),
                },
                _ => AmoGridError::CommandFailed {
                    command: request.command_line(),
                    stderr: e.to_string(),
                },
            })?;

        let files = request
            .return_files
            .iter()
            .map(|name| ReturnedFile {
                name: name.clone(),
                data: read_returned(&request.workdir.join(name)),
            })
            .collect();

        Ok(ExecutionOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            files,
        })
    }
}

fn read_returned(path: &Path) -> std::result::Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_command_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let request = ExecutionRequest {
            command: vec!["amogrid-no-such-program-xyz".to_string()],
            files: vec![],
            return_files: vec![],
            workdir: dir.path().to_path_buf(),
        };
        let err = LocalExecutor.execute(&request).unwrap_err();
        assert!(matches!(err, AmoGridError::CommandNotFound { .. }));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let request = ExecutionRequest {
            command: vec![],
            files: vec![],
            return_files: vec![],
            workdir: dir.path().to_path_buf(),
        };
        assert!(matches!(
            LocalExecutor.execute(&request),
            Err(AmoGridError::InvalidArgument(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_program_and_returns_files() {
        let dir = tempfile::tempdir().unwrap();
        let request = ExecutionRequest {
            command: vec![
                "sh".to_string(),
                "-c".to_string(),
                "cp input.in output.dat; echo warning >&2".to_string(),
            ],
            files: vec![("input.in".to_string(), "center grid points: 5".to_string())],
            return_files: vec!["output.dat".to_string(), "missing.dat".to_string()],
            workdir: dir.path().join("step"),
        };

        let out = LocalExecutor.execute(&request).unwrap();
        assert!(out.success);
        assert_eq!(out.stderr.trim(), "warning");
        assert_eq!(out.files[0].name, "output.dat");
        assert_eq!(out.files[0].data.as_deref(), Ok("center grid points: 5"));
        assert!(out.files[1].data.is_err());
    }
}
