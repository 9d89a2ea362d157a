use std::fmt;

use thiserror::Error;

pub const PUBLIC_HTTPS_PREFIX: &str = "https://github.com/";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RemoteUrlError {
    #[error("unsupported remote url format: expected git@ or http(s):// prefix")]
    UnsupportedFormat,
    #[error("invalid ssh remote url: missing colon separator")]
    MissingColonSeparator,
    #[error("invalid http(s) remote url: missing path after host")]
    MissingPath,
    #[error("invalid remote url: expected exactly owner/repo, got {path:?}")]
    MalformedOwnerRepo { path: String },
}

/// The `owner/name` pair a remote points at. Host is deliberately not kept:
/// enterprise and self-hosted remotes scope queries the same way.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
    owner: String,
    name: String,
}

impl RepositoryIdentity {
    pub fn new(owner: &str, name: &str) -> Result<Self, RemoteUrlError> {
        if owner.is_empty() || name.is_empty() {
            return Err(RemoteUrlError::MalformedOwnerRepo {
                path: format!("{owner}/{name}"),
            });
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// `owner/name`, the form used inside a `repo:` token.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse an ssh (`git@host:owner/repo.git`) or http(s)
/// (`https://host/owner/repo.git`) remote url. Any host is accepted.
pub fn parse_remote_url(url: &str) -> Result<RepositoryIdentity, RemoteUrlError> {
    let url = url.trim();
    let url = url.strip_suffix('/').unwrap_or(url);

    if url.starts_with("git@") {
        let (_, path) = url
            .split_once(':')
            .ok_or(RemoteUrlError::MissingColonSeparator)?;
        let path = path.strip_suffix(".git").unwrap_or(path);
        // git@host:/owner/repo
        let path = path.strip_prefix('/').unwrap_or(path);
        return owner_repo(path);
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    if let Some(rest) = rest {
        let (_, path) = rest.split_once('/').ok_or(RemoteUrlError::MissingPath)?;
        let path = path.strip_suffix(".git").unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        return owner_repo(path);
    }

    Err(RemoteUrlError::UnsupportedFormat)
}

fn owner_repo(path: &str) -> Result<RepositoryIdentity, RemoteUrlError> {
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            RepositoryIdentity::new(owner, name)
        }
        _ => Err(RemoteUrlError::MalformedOwnerRepo {
            path: path.to_string(),
        }),
    }
}

/// Display helper: `owner/name` for public-host https urls, the url itself
/// for everything else (including urls that fail to parse).
pub fn short_display_name(url: &str) -> String {
    if !url.trim().starts_with(PUBLIC_HTTPS_PREFIX) {
        return url.to_string();
    }
    match parse_remote_url(url) {
        Ok(id) => id.slug(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/git/remote_url_tests.rs"]
mod tests;
