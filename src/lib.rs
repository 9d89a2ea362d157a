pub mod config;
pub mod git;
pub mod logging;
pub mod query;
pub mod search;
pub mod section;
pub mod tui;
mod tui_shell;
