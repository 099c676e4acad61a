//! Git remote source - repository owner and name from the checkout's remote.

use std::path::{Path, PathBuf};

use git2::Repository;
use thiserror::Error;
use url::Url;

use crate::sources::RemoteReader;

/// Error reading repository metadata.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("`{}` is not inside a git repository", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("repository has no remotes")]
    NoRemote,

    #[error("failed to read remotes")]
    Git(#[from] git2::Error),

    #[error("could not parse remote URL `{0}`")]
    Unparseable(String),
}

/// Where the package is hosted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub url: Url,
    pub owner: String,
    pub name: String,
}

impl RemoteInfo {
    /// Parse a remote URL, accepting scp-style `git@host:owner/name.git`.
    pub fn parse(raw: &str) -> Result<Self, RemoteError> {
        let raw = raw.trim();
        let unparseable = || RemoteError::Unparseable(raw.to_string());

        let url = if raw.contains("://") {
            Url::parse(raw).map_err(|_| unparseable())?
        } else {
            // scp-like syntax: [user@]host:path
            let (host, path) = raw.split_once(':').ok_or_else(unparseable)?;
            let host = host.rsplit('@').next().unwrap_or(host);
            if host.is_empty() || path.is_empty() {
                return Err(unparseable());
            }
            Url::parse(&format!("https://{}/{}", host, path.trim_start_matches('/')))
                .map_err(|_| unparseable())?
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [.., owner, name] => {
                let name = name.strip_suffix(".git").unwrap_or(*name);
                if name.is_empty() {
                    return Err(unparseable());
                }
                Ok(RemoteInfo {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    url,
                })
            }
            _ => Err(unparseable()),
        }
    }
}

/// Reads the `origin` remote (or the first remote) of the enclosing repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitRemoteReader;

impl RemoteReader for GitRemoteReader {
    fn read_remote(&self, root: &Path) -> Result<RemoteInfo, RemoteError> {
        let repo = Repository::discover(root).map_err(|source| RemoteError::NotARepository {
            path: root.to_path_buf(),
            source,
        })?;

        let names = repo.remotes()?;
        let name = names
            .iter()
            .flatten()
            .find(|n| *n == "origin")
            .or_else(|| names.iter().flatten().next())
            .ok_or(RemoteError::NoRemote)?;

        let remote = repo.find_remote(name)?;
        let url = remote
            .url()
            .ok_or_else(|| RemoteError::Unparseable(name.to_string()))?;

        tracing::debug!("Using git remote `{}` ({})", name, url);
        RemoteInfo::parse(url)
    }
}
