use clap::{Parser, Subcommand};

/// Search, install and update packages across apt, pacstall, flatpak and snap
#[derive(Parser, Debug)]
#[command(name = "rhino-pkg", version, about, long_about = None)]
pub struct Cli {
    /// Print debug logs
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Search every available source for packages
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search, pick one result and install it
    Install {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Remove packages (not implemented yet)
    Remove {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Update every detected source
    Update {
        /// Answer yes to every prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Clean caches (not implemented yet)
    Cleanup,
}

/// 多个参数以空格拼接为一个查询串
pub fn join_query(words: &[String]) -> String {
    words.join(" ")
}
