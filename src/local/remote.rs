//! Parsing of Git remote URLs into GitHub coordinates.

use url::Url;

use super::error::LocalDiscoveryError;

/// Host, owner, and repository named by a Git remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubOrigin {
    host: String,
    port: Option<u16>,
    owner: String,
    repository: String,
}

impl GitHubOrigin {
    /// Repository owner (user or organisation).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without any `.git` suffix.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Host the remote points at.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true for the public `github.com` host.
    #[must_use]
    pub fn is_github_com(&self) -> bool {
        self.host.eq_ignore_ascii_case("github.com")
    }

    /// HTTPS URL of the host, suitable for deriving the API base.
    ///
    /// SSH ports are dropped since the web interface never shares them.
    #[must_use]
    pub fn web_url(&self) -> String {
        match self.port {
            Some(port) if port != 22 => format!("https://{}:{port}", self.host),
            _ => format!("https://{}", self.host),
        }
    }
}

/// Parses a Git remote URL.
///
/// Accepted forms are `git@host:owner/repo.git`, `ssh://git@host[:port]/owner/repo.git`
/// and `https://host[:port]/owner/repo[.git]`. The `.git` suffix is optional.
///
/// # Errors
///
/// Returns `LocalDiscoveryError::InvalidRemoteUrl` when the URL does not name
/// exactly an owner and a repository.
pub fn parse_github_remote(url: &str) -> Result<GitHubOrigin, LocalDiscoveryError> {
    let trimmed = url.trim();

    parse_scp_style(trimmed)
        .or_else(|| parse_url_style(trimmed))
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: url.to_owned(),
        })
}

/// `user@host:owner/repo.git`; SCP-style remotes never carry a port.
fn parse_scp_style(url: &str) -> Option<GitHubOrigin> {
    if url.contains("://") {
        return None;
    }
    let (user_host, path) = url.split_once(':')?;
    let (_, host) = user_host.split_once('@')?;
    origin_from_path(host, None, path)
}

fn parse_url_style(url: &str) -> Option<GitHubOrigin> {
    let parsed = Url::parse(url).ok()?;
    origin_from_path(parsed.host_str()?, parsed.port(), parsed.path())
}

fn origin_from_path(host: &str, port: Option<u16>, raw_path: &str) -> Option<GitHubOrigin> {
    let mut parts = raw_path.trim_matches('/').split('/');
    let owner = parts.next().filter(|segment| !segment.is_empty())?;
    let repo_segment = parts.next()?;
    if parts.next().is_some() || host.is_empty() {
        return None;
    }

    let repository = repo_segment.strip_suffix(".git").unwrap_or(repo_segment);
    if repository.is_empty() {
        return None;
    }

    Some(GitHubOrigin {
        host: host.to_owned(),
        port,
        owner: owner.to_owned(),
        repository: repository.to_owned(),
    })
}
