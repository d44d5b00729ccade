//! Repository coordinates, git references, and identity wrappers.

use std::fmt;

use url::Url;

use super::error::ReleaseError;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ReleaseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ReleaseError::InvalidRepository);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ReleaseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ReleaseError::InvalidRepository);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReleaseError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReleaseError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// A tag, branch, or commit naming one end of a release comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitReference(String);

impl GitReference {
    /// Validates a reference supplied for the given comparison side.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::BlankReference` when the value is blank or
    /// contains whitespace.
    pub fn new(value: &str, role: &'static str) -> Result<Self, ReleaseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ReleaseError::BlankReference { role });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the reference text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GitReference {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Opaque commit identifier as returned by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    /// Wraps a commit hash.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the hash.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Derives the GitHub API base URL from a host string.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, ReleaseError> {
    if host.eq_ignore_ascii_case("github.com") || host.eq_ignore_ascii_case("api.github.com") {
        return Url::parse(GITHUB_API_BASE)
            .map_err(|error| ReleaseError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
        .map_err(|error| ReleaseError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(port)
        .map_err(|()| ReleaseError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

fn derive_api_base(parsed: &Url) -> Result<Url, ReleaseError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| ReleaseError::InvalidUrl("URL must include a host".to_owned()))?;

    derive_api_base_from_host(parsed.scheme(), host, parsed.port())
}

/// Repository coordinates with the API base they are served from.
///
/// # Example
///
/// ```
/// use release_tickets::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_owner_repo("acme", "widgets")
///     .expect("should build locator");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// assert_eq!(locator.owner().as_str(), "acme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a repository hosted on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidRepository` when owner or repo is blank.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ReleaseError> {
        let api_base = Url::parse(GITHUB_API_BASE)
            .map_err(|error| ReleaseError::InvalidUrl(error.to_string()))?;
        Self::with_api_base(api_base, owner, repo)
    }

    /// Creates a locator for a repository on the given GitHub host.
    ///
    /// `host_url` is the web URL of the installation, for example
    /// `https://ghe.example.com`; the API base is derived from its host.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidUrl` when `host_url` cannot be parsed and
    /// `ReleaseError::InvalidRepository` when owner or repo is blank.
    pub fn on_host(host_url: &str, owner: &str, repo: &str) -> Result<Self, ReleaseError> {
        let parsed =
            Url::parse(host_url).map_err(|error| ReleaseError::InvalidUrl(error.to_string()))?;
        Self::with_api_base(derive_api_base(&parsed)?, owner, repo)
    }

    /// Parses a repository URL in the form `https://<host>/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidUrl` when parsing fails and
    /// `ReleaseError::InvalidRepository` when the path lacks owner or repo.
    pub fn parse(input: &str) -> Result<Self, ReleaseError> {
        let parsed =
            Url::parse(input).map_err(|error| ReleaseError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(ReleaseError::InvalidRepository)?;
        let owner = segments.next().ok_or(ReleaseError::InvalidRepository)?;
        let repo = segments.next().ok_or(ReleaseError::InvalidRepository)?;
        let repo_name = repo.strip_suffix(".git").unwrap_or(repo);

        Self::with_api_base(derive_api_base(&parsed)?, owner, repo_name)
    }

    fn with_api_base(api_base: Url, owner: &str, repo: &str) -> Result<Self, ReleaseError> {
        Ok(Self {
            api_base,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// API base URL for the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    pub(crate) fn compare_path(&self, base: &GitReference, head: &GitReference) -> String {
        format!(
            "/repos/{}/{}/compare/{}...{}",
            self.owner.as_str(),
            self.repository.as_str(),
            base.as_str(),
            head.as_str()
        )
    }

    pub(crate) fn commit_pulls_path(&self, sha: &CommitSha) -> String {
        format!(
            "/repos/{}/{}/commits/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str(),
            sha.as_str()
        )
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
