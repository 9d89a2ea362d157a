use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::git::{GitCli, RemoteLookup};
use crate::query::Identities;
use crate::search::{GithubSearch, SearchClient};
use crate::section::Section;
use crate::tui::TuiRunOptions;

mod app;
mod event_loop;
mod input;
mod render;
mod repo_picker;
mod time_utils;

use app::{App, Focus, StatusKind};
use input::Input;
use repo_picker::{PickerOutcome, RepoPicker};
use time_utils::fmt_updated;

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let repo_dir = if opts.repo_dir.as_os_str().is_empty() {
        std::env::current_dir().context("get current dir")?
    } else {
        opts.repo_dir.clone()
    };
    let lookup: Box<dyn RemoteLookup> = match opts.remotes.clone() {
        Some(remotes) => Box::new(remotes),
        None => Box::new(GitCli::default()),
    };
    let client: Box<dyn SearchClient> =
        Box::new(GithubSearch::from_env(&opts.config.github.api_url)?);
    let mut app = App::new(&opts.config, repo_dir, lookup, client);

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    app.refresh_active();
    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    tracing::info!("dashboard closed");
    res
}
