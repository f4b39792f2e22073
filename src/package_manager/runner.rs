//! 外部命令执行

use super::types::{CommandOutput, Invocation};
use anyhow::{Context, Result};
use duct::cmd;

/// 所有外部进程都经由这里启动
pub trait CommandRunner {
    /// 捕获 stdout / stderr，不连接终端
    fn capture(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// 前台执行，继承 stdin / stdout / stderr；非零退出码视为错误
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// 真正启动子进程的实现
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, invocation: &Invocation) -> Result<CommandOutput> {
        log::debug!("捕获: {}", invocation);
        let output = cmd(invocation.program.as_str(), invocation.args.iter())
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .with_context(|| format!("failed to start {}", invocation.program))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }

    fn run(&self, invocation: &Invocation) -> Result<()> {
        log::debug!("执行: {}", invocation);
        let output = cmd(invocation.program.as_str(), invocation.args.iter())
            .unchecked()
            .run()
            .with_context(|| format!("failed to start {}", invocation.program))?;

        if !output.status.success() {
            anyhow::bail!("{}", output.status);
        }
        Ok(())
    }
}
