//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.release-tickets.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `RELEASE_TICKETS_OWNER`,
//!    `RELEASE_TICKETS_PREV_REF`, `RELEASE_TICKETS_TOKEN`, ... or legacy
//!    `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `-owner`, `-prevRef`, `--owner`/`-o`,
//!    `--prev-ref`/`-p`, ... (see [`normalise_flag_spellings`])
//!
//! Settings left unset may be filled from the enclosing Git checkout; see
//! [`ReleaseConfig::discover_local`].
//!
//! # Configuration File
//!
//! ```toml
//! owner = "acme"
//! repo = "widgets"
//! branch = "main"
//! prev_ref = "v1.0"
//! curr_ref = "v1.1"
//! github_url = "https://ghe.example.com"
//! format = "json"
//! ```

mod flags;

use std::env;
use std::path::Path;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::ReleaseError;
use crate::github::gateway::PullRequestFilter;
use crate::github::locator::{GitReference, RepositoryLocator};
use crate::local::{GitHubOrigin, LocalDiscoveryError, LocalRepository, discover_repository};
use crate::release::{OutputFormat, ReleaseRequest};

pub use flags::normalise_flag_spellings;

/// Legacy environment variable consulted when no token is configured.
pub const LEGACY_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use release_tickets::ReleaseConfig;
/// use release_tickets::config::normalise_flag_spellings;
///
/// let args = normalise_flag_spellings(std::env::args_os());
/// let config = ReleaseConfig::load_from_iter(args).expect("failed to load configuration");
/// let request = config.release_request(None).expect("settings required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "RELEASE_TICKETS",
    discovery(
        dotfile_name = ".release-tickets.toml",
        config_file_name = "release-tickets.toml",
        app_name = "release-tickets"
    )
)]
pub struct ReleaseConfig {
    /// Repository owner (e.g., "acme").
    ///
    /// Can be provided via:
    /// - CLI: `-owner <OWNER>`, `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `RELEASE_TICKETS_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "widgets").
    ///
    /// Can be provided via:
    /// - CLI: `-repo <REPO>`, `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `RELEASE_TICKETS_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Branch the release's pull requests were merged into.
    ///
    /// Unset or blank matches pull requests into any branch.
    #[ortho_config(cli_short = 'b')]
    pub branch: Option<String>,

    /// Reference of the previous deployment (tag, branch, or SHA).
    #[ortho_config(cli_short = 'p')]
    pub prev_ref: Option<String>,

    /// Reference being deployed. Defaults to the local `HEAD` commit.
    #[ortho_config(cli_short = 'c')]
    pub curr_ref: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `RELEASE_TICKETS_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Web URL of the GitHub installation, e.g. `https://ghe.example.com`.
    ///
    /// Defaults to `github.com`, or to the host of a discovered `origin`.
    #[ortho_config(cli_short = 'g')]
    pub github_url: Option<String>,

    /// Output format: `text` (default) or `json`.
    #[ortho_config(cli_short = 'f')]
    pub format: Option<String>,

    /// Disables filling unset settings from the local Git checkout.
    ///
    /// Can be provided via:
    /// - CLI: `--no-local-discovery` / `-n`
    /// - Config file: `no_local_discovery = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the environment.
    #[ortho_config(cli_short = 'n')]
    pub no_local_discovery: bool,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|text| text.trim()).filter(|text| !text.is_empty())
}

impl ReleaseConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, ReleaseError> {
        non_blank(self.token.as_ref())
            .map(str::to_owned)
            .or_else(|| env::var(LEGACY_TOKEN_ENV).ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(ReleaseError::MissingToken)
    }

    /// Returns the previous reference or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingSetting`] when no reference is
    /// configured.
    pub fn require_previous_ref(&self) -> Result<&str, ReleaseError> {
        non_blank(self.prev_ref.as_ref()).ok_or(ReleaseError::MissingSetting {
            setting: "previous reference",
            flag: "-prevRef",
        })
    }

    /// Parses the configured output format.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Configuration`] for an unknown format name.
    pub fn output_format(&self) -> Result<OutputFormat, ReleaseError> {
        self.format
            .as_deref()
            .map_or(Ok(OutputFormat::default()), |format| format.parse())
    }

    /// Pull request filter for the configured branch.
    #[must_use]
    pub fn pull_request_filter(&self) -> PullRequestFilter {
        PullRequestFilter::closed_into(self.branch.as_deref().unwrap_or_default())
    }

    /// Returns true when a setting that local discovery can supply is unset
    /// and discovery has not been disabled.
    #[must_use]
    pub fn needs_local_discovery(&self) -> bool {
        !self.no_local_discovery
            && (non_blank(self.owner.as_ref()).is_none()
                || non_blank(self.repo.as_ref()).is_none()
                || non_blank(self.curr_ref.as_ref()).is_none())
    }

    /// Inspects the checkout containing `start_path` when settings are
    /// missing.
    ///
    /// A missing checkout, remote, or unparseable remote URL is logged and
    /// yields `None`; the settings it would have supplied are then reported
    /// as missing by [`Self::release_request`].
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::LocalDiscovery`] when Git itself fails.
    pub fn discover_local(
        &self,
        start_path: &Path,
    ) -> Result<Option<LocalRepository>, ReleaseError> {
        if !self.needs_local_discovery() {
            return Ok(None);
        }

        match discover_repository(start_path) {
            Ok(local) => {
                tracing::debug!(
                    "discovered repository {}/{} from local Git",
                    local.origin().owner(),
                    local.origin().repository()
                );
                Ok(Some(local))
            }
            Err(LocalDiscoveryError::NotARepository) => Ok(None),
            Err(LocalDiscoveryError::Git { message }) => {
                Err(ReleaseError::LocalDiscovery { message })
            }
            Err(error) => {
                tracing::warn!("local repository discovery skipped: {error}");
                Ok(None)
            }
        }
    }

    /// Assembles the release request from configuration, filling unset
    /// repository coordinates and the current reference from `local`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingSetting`] for a setting neither source
    /// provides, [`ReleaseError::BlankReference`] for a malformed reference,
    /// and [`ReleaseError::InvalidUrl`] when `github_url` cannot be parsed.
    pub fn release_request(
        &self,
        local: Option<&LocalRepository>,
    ) -> Result<ReleaseRequest, ReleaseError> {
        let locator = self.repository_locator(local.map(LocalRepository::origin))?;
        let previous = GitReference::new(self.require_previous_ref()?, "previous")?;
        let current = self.current_reference(local)?;

        Ok(ReleaseRequest {
            locator,
            previous,
            current,
            filter: self.pull_request_filter(),
        })
    }

    fn repository_locator(
        &self,
        origin: Option<&GitHubOrigin>,
    ) -> Result<RepositoryLocator, ReleaseError> {
        let configured_owner = non_blank(self.owner.as_ref());
        let configured_repo = non_blank(self.repo.as_ref());
        let uses_origin = configured_owner.is_none() || configured_repo.is_none();

        let owner = configured_owner
            .or_else(|| origin.map(GitHubOrigin::owner))
            .ok_or(ReleaseError::MissingSetting {
                setting: "repository owner",
                flag: "-owner",
            })?;
        let repo = configured_repo
            .or_else(|| origin.map(GitHubOrigin::repository))
            .ok_or(ReleaseError::MissingSetting {
                setting: "repository name",
                flag: "-repo",
            })?;

        if let Some(github_url) = non_blank(self.github_url.as_ref()) {
            return RepositoryLocator::on_host(github_url, owner, repo);
        }
        match origin {
            Some(found) if uses_origin && !found.is_github_com() => {
                RepositoryLocator::on_host(&found.web_url(), owner, repo)
            }
            _ => RepositoryLocator::from_owner_repo(owner, repo),
        }
    }

    fn current_reference(
        &self,
        local: Option<&LocalRepository>,
    ) -> Result<GitReference, ReleaseError> {
        if let Some(configured) = non_blank(self.curr_ref.as_ref()) {
            return GitReference::new(configured, "current");
        }
        let head = local
            .and_then(LocalRepository::head)
            .ok_or(ReleaseError::MissingSetting {
                setting: "current reference",
                flag: "-currRef",
            })?;
        GitReference::new(head.as_str(), "current")
    }
}

#[cfg(test)]
mod tests;
