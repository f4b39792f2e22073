use crate::package_manager::{Capabilities, Invocation};
use std::io::{self, IsTerminal};

/// 提权方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// 通过 sudo 运行需要特权的命令
    Sudo,
    /// 已经是 root，直接运行
    Root,
}

impl Escalation {
    pub fn detect() -> Self {
        // SAFETY: geteuid 总是成功且没有副作用
        if unsafe { libc::geteuid() } == 0 {
            Escalation::Root
        } else {
            Escalation::Sudo
        }
    }

    pub fn apply(&self, invocation: Invocation, privileged: bool) -> Invocation {
        match (self, privileged) {
            (Escalation::Sudo, true) => invocation.wrapped_by("sudo"),
            _ => invocation,
        }
    }
}

/// 启动时计算一次的运行配置，之后只读地传给各个流程
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub capabilities: Capabilities,
    pub escalation: Escalation,
    /// stdout 是终端时才输出带颜色的列表
    pub color: bool,
}

impl Config {
    pub fn detect() -> Self {
        let config = Self {
            capabilities: Capabilities::detect(),
            escalation: Escalation::detect(),
            color: io::stdout().is_terminal(),
        };
        log::debug!("提权方式: {:?}, 彩色输出: {}", config.escalation, config.color);
        config
    }

    /// 按配置决定是否加 sudo
    pub fn escalate(&self, invocation: Invocation, privileged: bool) -> Invocation {
        self.escalation.apply(invocation, privileged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sudo_wraps_only_privileged_commands() {
        let inv = Invocation::new("snap", ["refresh"]);
        assert_eq!(Escalation::Sudo.apply(inv.clone(), true).to_string(), "sudo snap refresh");
        assert_eq!(Escalation::Sudo.apply(inv.clone(), false).to_string(), "snap refresh");
    }

    #[test]
    fn root_never_wraps() {
        let inv = Invocation::new("apt", ["update"]);
        assert_eq!(Escalation::Root.apply(inv, true).to_string(), "apt update");
    }
}
