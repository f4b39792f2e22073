//! 跨来源搜索与结果展示

use crate::config::Config;
use crate::package_manager::parser::{is_no_match, parse_search_output};
use crate::package_manager::{CommandRunner, PackageRecord, Source};
use crossterm::style::Stylize;
use std::io::{self, Write};

/// 依次查询每个可用来源。单个来源失败只提示，不影响其余来源
pub fn aggregate(query: &str, config: &Config, runner: &dyn CommandRunner) -> Vec<PackageRecord> {
    let mut records = Vec::new();
    for source in config.capabilities.available() {
        let found = query_source(source, query, runner);
        log::debug!("{}: {} 条结果", source, found.len());
        records.extend(found);
    }
    records
}

fn query_source(source: Source, query: &str, runner: &dyn CommandRunner) -> Vec<PackageRecord> {
    let invocation = source.search_command(query);
    let output = match runner.capture(&invocation) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("{} 启动失败: {:#}", invocation, e);
            eprintln!("Error running {}: {:#}", invocation.program, e);
            return Vec::new();
        }
    };

    if is_no_match(source, &output) {
        return Vec::new();
    }
    if !output.success {
        log::debug!("{} 执行失败: {}", invocation, output.stderr.trim());
        eprintln!("Error running {}: {}", invocation.program, failure_reason(&output.stderr));
        return Vec::new();
    }

    parse_search_output(source, &output.stdout)
}

fn failure_reason(stderr: &str) -> &str {
    stderr
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .unwrap_or("non-zero exit status")
}

/// 带序号输出结果列表：`[i] name (source)`。`color` 为假时输出纯文本
pub fn print_list(out: &mut dyn Write, records: &[PackageRecord], color: bool) -> io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        let index = format!("[{}]", i);
        let tag = record.source.tag();
        if color {
            writeln!(out, "{} {} ({})", index.cyan(), record.name, tag.dark_grey())?;
        } else {
            writeln!(out, "{} {} ({})", index, record.name, tag)?;
        }
    }
    Ok(())
}

/// `search` 命令
pub fn run(query: &str, config: &Config, runner: &dyn CommandRunner) -> io::Result<()> {
    println!("Searching for packages matching '{}'...", query);
    let records = aggregate(query, config, runner);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if records.is_empty() {
        writeln!(out, "No packages found.")?;
    } else {
        print_list(&mut out, &records, config.color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Escalation;
    use crate::package_manager::parser::strip_ansi;
    use crate::package_manager::runner::fake::FakeRunner;
    use crate::package_manager::{Capabilities, CommandOutput};

    fn config(caps: Capabilities) -> Config {
        Config {
            capabilities: caps,
            escalation: Escalation::Sudo,
            color: false,
        }
    }

    #[test]
    fn only_apt_present() {
        let caps = Capabilities {
            apt: true,
            ..Default::default()
        };
        let apt_output = "vim - Vi IMproved - enhanced vi editor\n\
                          vim-athena - Vi IMproved - enhanced vi editor - with Athena GUI\n\
                          \n\
                          vim-common - Vi IMproved - Common files\n";
        let runner = FakeRunner::default().with_output("apt-cache", apt_output);

        let records = aggregate("vim", &config(caps), &runner);

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.source == Source::Apt));
        assert_eq!(records[0].name, "vim");
        assert_eq!(records[2].name, "vim-common");
        let captured = runner.captured.borrow();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].to_string(), "apt-cache search vim");
    }

    #[test]
    fn unavailable_sources_are_not_queried() {
        let runner = FakeRunner::default();
        let records = aggregate("vim", &config(Capabilities::default()), &runner);
        assert!(records.is_empty());
        assert!(runner.captured.borrow().is_empty());
    }

    #[test]
    fn failing_source_does_not_abort_others() {
        let caps = Capabilities {
            apt: true,
            pacstall: true,
            flatpak: true,
            ..Default::default()
        };
        let runner = FakeRunner::default()
            .failing("apt-cache")
            .with_raw(
                "pacstall",
                CommandOutput {
                    stdout: "partial-output\n".to_string(),
                    stderr: "pacstall: repository unreachable\n".to_string(),
                    success: false,
                },
            )
            .with_output("flatpak", "GIMP  GNU Image Manipulation Program  org.gimp.GIMP\n");

        let records = aggregate("gimp", &config(caps), &runner);

        assert_eq!(records, vec![PackageRecord::new("GIMP", Source::Flatpak)]);
        assert_eq!(runner.captured.borrow().len(), 3);
    }

    #[test]
    fn snap_sentinel_yields_nothing() {
        let caps = Capabilities {
            snap: true,
            pacstall: true,
            ..Default::default()
        };
        let runner = FakeRunner::default()
            .with_output("pacstall", "\x1b[1;32mneofetch\x1b[0m @ pacstall\n")
            .with_raw(
                "snap",
                CommandOutput {
                    stdout: String::new(),
                    stderr: "No matching snaps for \"neofetch\"\n".to_string(),
                    success: false,
                },
            );

        let records = aggregate("neofetch", &config(caps), &runner);

        assert_eq!(records, vec![PackageRecord::new("neofetch", Source::Pacstall)]);
    }

    #[test]
    fn sources_follow_fixed_order() {
        let caps = Capabilities {
            apt: true,
            pacstall: true,
            flatpak: true,
            snap: true,
            nala: false,
        };
        let runner = FakeRunner::default()
            .with_output("snap", "s1\n")
            .with_output("flatpak", "f1\nf2\n")
            .with_output("pacstall", "p1\n")
            .with_output("apt-cache", "a1\n");

        let records = aggregate("x", &config(caps), &runner);
        let tags: Vec<&str> = records.iter().map(|r| r.source.tag()).collect();

        assert_eq!(tags, vec!["apt", "pacstall", "flatpak", "flatpak", "snap"]);
    }

    fn rendered(color: bool) -> String {
        let records = vec![
            PackageRecord::new("vim", Source::Apt),
            PackageRecord::new("hello", Source::Snap),
        ];
        let mut out = Vec::new();
        print_list(&mut out, &records, color).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_list_has_no_escapes() {
        assert_eq!(rendered(false), "[0] vim (apt)\n[1] hello (snap)\n");
    }

    #[test]
    fn colored_list_strips_to_plain() {
        assert_eq!(strip_ansi(&rendered(true)), rendered(false));
    }

    #[test]
    fn failure_reason_uses_last_stderr_line() {
        assert_eq!(failure_reason("W: a\nE: lock held\n\n"), "E: lock held");
        assert_eq!(failure_reason(""), "non-zero exit status");
    }
}
