use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::query::tokens::has_repo_token;

const APP_DIR: &str = "scopedash";
const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashConfig {
    /// Scope every section to the origin repository on startup.
    #[serde(default = "default_true")]
    pub smart_filtering_at_launch: bool,

    #[serde(default = "default_true")]
    pub show_author_icons: bool,

    #[serde(default = "default_pr_sections")]
    pub pr_sections: Vec<SectionConfig>,

    #[serde(default = "default_issues_sections")]
    pub issues_sections: Vec<SectionConfig>,

    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub title: String,
    pub filters: String,

    /// Rows fetched per refresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SectionConfig {
    pub fn new(title: &str, filters: &str) -> Self {
        Self {
            title: title.to_string(),
            filters: filters.to_string(),
            limit: None,
        }
    }

    /// The base filter names a repo itself; scoping stays out of the way.
    pub fn pins_repo(&self) -> bool {
        has_repo_token(&self.filters)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            smart_filtering_at_launch: true,
            show_author_icons: true,
            pr_sections: default_pr_sections(),
            issues_sections: default_issues_sections(),
            github: GithubConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_pr_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("My Pull Requests", "is:open author:@me"),
        SectionConfig::new("Needs My Review", "is:open review-requested:@me"),
        SectionConfig::new("Involved", "is:open involves:@me -author:@me"),
    ]
}

fn default_issues_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("My Issues", "is:open author:@me"),
        SectionConfig::new("Assigned", "is:open assignee:@me"),
    ]
}

impl DashConfig {
    /// Load from `path`, or from the default location when `path` is
    /// `None`. Only a missing default file falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(anyhow!("config file not found at {}", path.display()));
            }
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: DashConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        cfg.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.pr_sections.is_empty() && self.issues_sections.is_empty() {
            anyhow::bail!("config defines no sections");
        }
        for s in self.pr_sections.iter().chain(self.issues_sections.iter()) {
            if s.title.trim().is_empty() {
                anyhow::bail!("section with filters {:?} has an empty title", s.filters);
            }
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_home().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

fn config_home() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    std::env::var_os("HOME")
        .filter(|d| !d.is_empty())
        .map(|h| PathBuf::from(h).join(".config"))
}

pub fn default_state_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_STATE_HOME").filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir).join(APP_DIR));
    }
    std::env::var_os("HOME")
        .filter(|d| !d.is_empty())
        .map(|h| PathBuf::from(h).join(".local/state").join(APP_DIR))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
