use clap::{Subcommand, ValueEnum};

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the repositories the origin and upstream remotes point at
    Remotes {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the query a section would search with
    Query {
        /// Section index within its kind
        #[arg(long, default_value_t = 0)]
        section: usize,
        /// Use the issues sections instead of the pull request sections
        #[arg(long)]
        issues: bool,
        /// Search text as typed into the search bar (replaces the configured filter)
        #[arg(long)]
        raw: Option<String>,
        /// Drop `author:@me`
        #[arg(long)]
        no_author: bool,
        /// Repository scope to apply
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
        /// Scope to this `owner/name` instead
        #[arg(long, conflicts_with = "scope")]
        custom: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ScopeArg {
    Origin,
    Upstream,
    None,
}

pub(crate) fn parse_remote_arg(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
            Ok((name.trim().to_string(), url.trim().to_string()))
        }
        _ => Err(format!("expected NAME=URL, got {:?}", s)),
    }
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
