use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scopedash::config::DashConfig;
use scopedash::git::{GitCli, RemoteLookup, StaticRemotes};
use scopedash::logging;

use crate::{Commands, parse_remote_arg};

#[derive(Parser)]
#[command(name = "scopedash")]
#[command(about = "Pull request and issue dashboard scoped to the current repository", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/scopedash/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Working copy whose remotes drive scoping (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Use this remote instead of asking git; repeatable
    #[arg(long = "remote", value_name = "NAME=URL", value_parser = parse_remote_arg)]
    remotes: Vec<(String, String)>,

    /// Dashboard log file (defaults to $XDG_STATE_HOME/scopedash/scopedash.log)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// What the dashboard and subcommands need from the global flags.
pub(crate) struct Env {
    pub(crate) config: DashConfig,
    pub(crate) repo_dir: PathBuf,
    pub(crate) remotes: Option<StaticRemotes>,
}

impl Env {
    pub(crate) fn lookup(&self) -> Box<dyn RemoteLookup> {
        match &self.remotes {
            Some(r) => Box::new(r.clone()),
            None => Box::new(GitCli::default()),
        }
    }
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            let path = cli
                .log_file
                .clone()
                .unwrap_or_else(logging::default_log_path);
            logging::init_file(&path)?;
        }
        Some(_) => {
            if cli.log_file.is_some() {
                anyhow::bail!("`--log-file` is only supported when running the dashboard (no subcommand)");
            }
            logging::init_stderr()?;
        }
    }

    let env = load_env(&cli)?;
    match cli.command {
        None => scopedash::tui::run_with_options(scopedash::tui::TuiRunOptions {
            config: env.config,
            repo_dir: env.repo_dir,
            remotes: env.remotes,
        }),
        Some(command) => crate::cli_exec::handle_command(command, &env),
    }
}

fn load_env(cli: &Cli) -> Result<Env> {
    let config = DashConfig::load(cli.config.as_deref())?;
    let repo_dir = match &cli.repo {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("get current dir")?,
    };
    let remotes = (!cli.remotes.is_empty()).then(|| {
        cli.remotes
            .iter()
            .fold(StaticRemotes::new(), |acc, (name, url)| acc.with(name, url))
    });
    Ok(Env {
        config,
        repo_dir,
        remotes,
    })
}
