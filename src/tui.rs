use std::path::PathBuf;

use anyhow::Result;

use crate::config::DashConfig;
use crate::git::StaticRemotes;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub config: DashConfig,
    /// Working copy whose remotes drive scoping. Empty means the current
    /// directory.
    pub repo_dir: PathBuf,
    /// Fixed remotes used instead of asking git.
    pub remotes: Option<StaticRemotes>,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
