//! Discovery of the enclosing Git checkout and its GitHub origin.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::github::locator::CommitSha;

use super::error::LocalDiscoveryError;
use super::remote::{GitHubOrigin, parse_github_remote};

const DEFAULT_REMOTE_NAME: &str = "origin";

/// A discovered checkout: where it lives, where it was cloned from, and the
/// commit it has checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    workdir: PathBuf,
    origin: GitHubOrigin,
    head: Option<CommitSha>,
}

impl LocalRepository {
    /// Assembles a repository description from already-known parts.
    #[must_use]
    pub const fn new(workdir: PathBuf, origin: GitHubOrigin, head: Option<CommitSha>) -> Self {
        Self {
            workdir,
            origin,
            head,
        }
    }

    /// Path to the repository working directory.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Parsed remote the checkout tracks.
    #[must_use]
    pub const fn origin(&self) -> &GitHubOrigin {
        &self.origin
    }

    /// Commit checked out at `HEAD`, or `None` for an unborn branch.
    #[must_use]
    pub const fn head(&self) -> Option<&CommitSha> {
        self.head.as_ref()
    }
}

/// Discovers the checkout containing `start_path` using the `origin` remote.
///
/// # Errors
///
/// Returns `NotARepository` outside a checkout, `RemoteNotFound` when there
/// is no `origin`, and `InvalidRemoteUrl` when its URL names no repository.
pub fn discover_repository(start_path: &Path) -> Result<LocalRepository, LocalDiscoveryError> {
    discover_repository_with_remote(start_path, DEFAULT_REMOTE_NAME)
}

/// Like [`discover_repository`] but reads the named remote.
///
/// # Errors
///
/// Returns the same errors as [`discover_repository`].
pub fn discover_repository_with_remote(
    start_path: &Path,
    remote_name: &str,
) -> Result<LocalRepository, LocalDiscoveryError> {
    let repo = Repository::discover(start_path).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let workdir = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or(LocalDiscoveryError::NotARepository)?;
    let origin = read_origin(&repo, remote_name)?;
    let head = head_commit(&repo);

    Ok(LocalRepository::new(workdir, origin, head))
}

fn read_origin(repo: &Repository, remote_name: &str) -> Result<GitHubOrigin, LocalDiscoveryError> {
    let remote = repo.find_remote(remote_name).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::RemoteNotFound {
                name: remote_name.to_owned(),
            }
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let url = remote
        .url()
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: "(no URL)".to_owned(),
        })?;

    parse_github_remote(url)
}

fn head_commit(repo: &Repository) -> Option<CommitSha> {
    let commit = repo.head().ok()?.peel_to_commit().ok()?;
    Some(CommitSha::new(commit.id().to_string()))
}
