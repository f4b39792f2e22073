//! 全来源更新

use crate::config::Config;
use crate::package_manager::{CommandRunner, Invocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 每一步都自动确认，适合无人值守
    Promptless,
    Interactive,
}

/// 更新序列中的一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub invocation: Invocation,
    pub privileged: bool,
    /// 免确认参数；无此参数的命令为 None
    pub auto_yes: Option<&'static str>,
}

impl Step {
    fn new(program: &str, args: &[&str], privileged: bool, auto_yes: Option<&'static str>) -> Self {
        Self {
            invocation: Invocation::new(program, args.iter().copied()),
            privileged,
            auto_yes,
        }
    }

    /// 按模式与提权方式生成最终命令行
    pub fn command(&self, mode: Mode, config: &Config) -> Invocation {
        let mut invocation = self.invocation.clone();
        if let (Mode::Promptless, Some(flag)) = (mode, self.auto_yes) {
            invocation = invocation.arg(flag);
        }
        config.escalate(invocation, self.privileged)
    }
}

/// 生成更新步骤。apt 与 pacstall 两组总会执行，snap / flatpak 仅在检测到时执行
pub fn plan(config: &Config) -> Vec<Step> {
    let caps = &config.capabilities;
    let apt = if caps.nala { "nala" } else { "apt" };

    let mut steps = vec![
        Step::new(apt, &["update"], true, None),
        Step::new(apt, &["upgrade"], true, Some("-y")),
        Step::new("pacstall", &["-U"], false, None),
        Step::new("pacstall", &["-Up"], false, Some("-P")),
    ];
    if caps.snap {
        steps.push(Step::new("snap", &["refresh"], true, None));
    }
    if caps.flatpak {
        steps.push(Step::new("flatpak", &["update"], false, Some("-y")));
    }
    steps
}

/// 依次执行所有步骤，单步失败不中断，返回失败步数
pub fn run(mode: Mode, config: &Config, runner: &dyn CommandRunner) -> usize {
    let steps = plan(config);
    let mut failed = 0;

    for step in &steps {
        let invocation = step.command(mode, config);
        println!(":: {}", invocation);
        if let Err(e) = runner.run(&invocation) {
            log::debug!("{} 失败: {:#}", invocation, e);
            eprintln!("Error running {}: {:#}", invocation.program, e);
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!("{} of {} update steps failed", failed, steps.len());
    }
    failed
}
