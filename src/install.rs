//! 搜索、选择、确认、安装

use crate::config::Config;
use crate::package_manager::{CommandRunner, PackageRecord};
use crate::search::{aggregate, print_list};
use std::io::{self, Read, Write};
use thiserror::Error;

/// 让 install 流程以退出码 1 结束的情况
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("No packages found matching '{0}'")]
    NoPackages(String),

    #[error("Error reading input: unexpected end of input")]
    EndOfInput,

    #[error("Error reading input: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid selection: '{0}' is not a number")]
    NotANumber(String),

    #[error("Invalid selection: {value} is not between 0 and {max}")]
    OutOfRange { value: i64, max: usize },

    #[error("Installation cancelled")]
    Declined,
}

/// 逐字节读取一行，不多读换行符之后的内容。
///
/// 安装命令会继承 stdin，剩下的输入要留给它。
fn read_line(input: &mut dyn Read) -> Result<String, SelectError> {
    let mut line = Vec::new();
    for byte in (&mut *input).bytes() {
        let byte = byte?;
        line.push(byte);
        if byte == b'\n' {
            break;
        }
    }
    if line.is_empty() {
        return Err(SelectError::EndOfInput);
    }
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// 读取一个序号，必须落在 `[0, len-1]`
pub fn prompt_selection(
    len: usize,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<usize, SelectError> {
    write!(
        out,
        "Enter the number of the package to install [0-{}]: ",
        len.saturating_sub(1)
    )?;
    out.flush()?;

    let line = read_line(input)?;
    let trimmed = line.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| SelectError::NotANumber(trimmed.to_string()))?;

    usize::try_from(value)
        .ok()
        .filter(|i| *i < len)
        .ok_or(SelectError::OutOfRange {
            value,
            max: len.saturating_sub(1),
        })
}

/// 只有输入恰好为 `y` 才算确认
pub fn confirm(
    record: &PackageRecord,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), SelectError> {
    write!(out, "Would you like to install {}? [y/N] ", record)?;
    out.flush()?;

    let answer = match read_line(input) {
        Ok(line) => line,
        Err(SelectError::EndOfInput) => return Err(SelectError::Declined),
        Err(e) => return Err(e),
    };
    match answer.split_whitespace().next() {
        Some("y") => Ok(()),
        _ => Err(SelectError::Declined),
    }
}

/// 调用对应来源的安装命令。失败只提示，不改变退出码
pub fn dispatch(record: &PackageRecord, config: &Config, runner: &dyn CommandRunner) {
    let command = record
        .source
        .install_command(&record.name, config.capabilities.nala);
    let invocation = config.escalate(command.invocation, command.privileged);

    if let Err(e) = runner.run(&invocation) {
        log::debug!("{} 失败: {:#}", invocation, e);
        eprintln!("Error running {}: {:#}", invocation.program, e);
    }
}

/// `install` 命令
pub fn run(
    query: &str,
    config: &Config,
    runner: &dyn CommandRunner,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), SelectError> {
    writeln!(out, "Searching for packages matching '{}'...", query)?;
    let records = aggregate(query, config, runner);
    if records.is_empty() {
        return Err(SelectError::NoPackages(query.to_string()));
    }
    print_list(out, &records, config.color)?;

    let index = prompt_selection(records.len(), input, out)?;
    let record = &records[index];
    confirm(record, input, out)?;

    dispatch(record, config, runner);
    Ok(())
}
