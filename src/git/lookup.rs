use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use thiserror::Error;

pub const ORIGIN: &str = "origin";
pub const UPSTREAM: &str = "upstream";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no {name} remote found")]
    NoSuchRemote { name: String },
    #[error("git binary `{binary}` could not be executed: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },
    #[error("git command failed (`git {args}`): {detail}")]
    CommandFailed { args: String, detail: String },
}

/// Source of configured remotes for a working copy.
pub trait RemoteLookup {
    fn list_remotes(&self, dir: &Path) -> Result<Vec<String>, LookupError>;

    fn remote_url(&self, dir: &Path, name: &str) -> Result<String, LookupError>;

    /// First configured url of the remote named exactly `name`.
    fn find_remote_url(&self, dir: &Path, name: &str) -> Result<String, LookupError> {
        let remotes = self.list_remotes(dir)?;
        if !remotes.iter().any(|r| r == name) {
            return Err(LookupError::NoSuchRemote {
                name: name.to_string(),
            });
        }
        self.remote_url(dir, name)
    }
}

/// Lookup backed by the `git` executable.
#[derive(Clone, Debug)]
pub struct GitCli {
    binary: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run_git(&self, dir: &Path, args: &[&str]) -> Result<Output, LookupError> {
        let mut full: Vec<OsString> = vec![OsString::from("-C"), dir.as_os_str().to_owned()];
        full.extend(args.iter().map(OsString::from));

        let output = Command::new(&self.binary)
            .args(&full)
            .output()
            .map_err(|source| LookupError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;
        if output.status.success() {
            return Ok(output);
        }
        Err(command_failed(args, &output))
    }
}

fn command_failed(args: &[&str], output: &Output) -> LookupError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let detail = if !stderr.is_empty() {
        stderr
    } else if !stdout.is_empty() {
        stdout
    } else {
        format!("exit status {}", output.status)
    };
    LookupError::CommandFailed {
        args: args.join(" "),
        detail,
    }
}

impl RemoteLookup for GitCli {
    fn list_remotes(&self, dir: &Path) -> Result<Vec<String>, LookupError> {
        let out = self.run_git(dir, &["remote"])?;
        Ok(String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn remote_url(&self, dir: &Path, name: &str) -> Result<String, LookupError> {
        let out = self.run_git(dir, &["remote", "get-url", name])?;
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
            .ok_or_else(|| LookupError::NoSuchRemote {
                name: name.to_string(),
            })
    }
}

/// Fixed remote table, independent of any working copy.
#[derive(Clone, Debug, Default)]
pub struct StaticRemotes {
    remotes: BTreeMap<String, Vec<String>>,
}

impl StaticRemotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, url: &str) -> Self {
        self.insert(name, url);
        self
    }

    pub fn insert(&mut self, name: &str, url: &str) {
        self.remotes
            .entry(name.to_string())
            .or_default()
            .push(url.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

impl RemoteLookup for StaticRemotes {
    fn list_remotes(&self, _dir: &Path) -> Result<Vec<String>, LookupError> {
        Ok(self.remotes.keys().cloned().collect())
    }

    fn remote_url(&self, _dir: &Path, name: &str) -> Result<String, LookupError> {
        self.remotes
            .get(name)
            .and_then(|urls| urls.first())
            .cloned()
            .ok_or_else(|| LookupError::NoSuchRemote {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "../tests/git/lookup_tests.rs"]
mod tests;
