mod cli;
mod config;
mod install;
mod package_manager;
mod search;
mod update;

use anyhow::Result;
use clap::Parser;
use cli::{join_query, Cli, Command};
use package_manager::SystemRunner;
use std::fs::File;
use std::io;
use std::os::fd::AsFd;

fn main() -> Result<()> {
    // clap 默认以 2 退出，这里统一为 1；--help / --version 仍为 0
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        std::process::exit(code);
    });

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = config::Config::detect();
    let runner = SystemRunner;

    match cli.command {
        Command::Search { query } => {
            search::run(&join_query(&query), &config, &runner)?;
        }
        Command::Install { query } => {
            // 直接读 fd 0，不经过 Stdin 的缓冲，剩余输入留给安装命令
            let mut stdin = File::from(io::stdin().as_fd().try_clone_to_owned()?);
            let stdout = io::stdout();
            let result = install::run(
                &join_query(&query),
                &config,
                &runner,
                &mut stdin,
                &mut stdout.lock(),
            );
            if let Err(e) = result {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        Command::Update { yes } => {
            let mode = if yes {
                update::Mode::Promptless
            } else {
                update::Mode::Interactive
            };
            update::run(mode, &config, &runner);
        }
        Command::Remove { .. } => not_implemented("remove"),
        Command::Cleanup => not_implemented("cleanup"),
    }

    Ok(())
}

fn not_implemented(command: &str) {
    eprintln!("rhino-pkg: '{}' is not implemented yet", command);
}
