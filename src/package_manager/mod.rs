//! 包管理器模块 — 对 apt / nala / pacstall / flatpak / snap 的封装

pub mod parser;
pub mod probe;
pub mod runner;
pub mod types;

// 重新导出常用类型和函数
pub use probe::Capabilities;
pub use runner::{CommandRunner, SystemRunner};
pub use types::{CommandOutput, Invocation, PackageRecord};

use std::fmt;

/// 搜索结果的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Apt,
    Pacstall,
    Flatpak,
    Snap,
}

/// 安装命令模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub invocation: Invocation,
    /// 是否需要 sudo
    pub privileged: bool,
}

impl Source {
    /// 搜索与展示时的固定顺序
    pub const ALL: [Source; 4] = [Source::Apt, Source::Pacstall, Source::Flatpak, Source::Snap];

    pub fn tag(&self) -> &'static str {
        match self {
            Source::Apt => "apt",
            Source::Pacstall => "pacstall",
            Source::Flatpak => "flatpak",
            Source::Snap => "snap",
        }
    }

    /// 用来判断该来源是否可用的可执行文件
    pub fn probe_binary(&self) -> &'static str {
        match self {
            Source::Apt => "apt-cache",
            Source::Pacstall => "pacstall",
            Source::Flatpak => "flatpak",
            Source::Snap => "snap",
        }
    }

    /// 搜索命令，查询串作为最后一个参数
    pub fn search_command(&self, query: &str) -> Invocation {
        let (program, args): (&str, &[&str]) = match self {
            Source::Apt => ("apt-cache", &["search"]),
            Source::Pacstall => ("pacstall", &["-S"]),
            Source::Flatpak => ("flatpak", &["search"]),
            Source::Snap => ("snap", &["find"]),
        };
        Invocation::new(program, args.iter().copied()).arg(query)
    }

    /// 搜索无结果时输出的提示行前缀
    pub fn no_match_sentinel(&self) -> Option<&'static str> {
        match self {
            Source::Snap => Some("No matching snaps for"),
            Source::Apt | Source::Pacstall | Source::Flatpak => None,
        }
    }

    /// 安装命令。`nala` 表示启动时检测到了 nala，apt 来源改用其语法
    pub fn install_command(&self, name: &str, nala: bool) -> InstallCommand {
        let (program, args, privileged): (&str, &[&str], bool) = match self {
            Source::Apt if nala => ("nala", &["install", "-y"], true),
            Source::Apt => ("apt", &["install", "-y"], true),
            Source::Pacstall => ("pacstall", &["-I"], false),
            Source::Flatpak => ("flatpak", &["install"], false),
            Source::Snap => ("snap", &["install"], true),
        };
        InstallCommand {
            invocation: Invocation::new(program, args.iter().copied()).arg(name),
            privileged,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
