//! Gateways for the GitHub endpoints a release comparison needs.
//!
//! The trait keeps the pipeline independent of Octocrab so it can be driven
//! by mocks in tests; [`OctocrabReleaseGateway`] performs the real requests.

mod client;
mod error_mapping;
mod release;

pub use release::{COMPARE_PAGE_SIZE, OctocrabReleaseGateway};

use async_trait::async_trait;

use crate::github::error::ReleaseError;
use crate::github::locator::{CommitSha, GitReference, RepositoryLocator};
use crate::github::models::AssociatedPullRequest;

/// Filters applied when listing the pull requests that contain a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestFilter {
    /// Target branch; `None` matches every branch.
    pub base_branch: Option<String>,
}

impl PullRequestFilter {
    /// Builds a filter for closed pull requests targeting `branch`.
    ///
    /// A blank branch disables the base-branch filter.
    #[must_use]
    pub fn closed_into(branch: &str) -> Self {
        let trimmed = branch.trim();
        Self {
            base_branch: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
        }
    }

    /// State query value sent to GitHub.
    #[must_use]
    pub const fn state(&self) -> &'static str {
        "closed"
    }

    /// Returns true when `pull_request` satisfies the filter.
    #[must_use]
    pub fn accepts(&self, pull_request: &AssociatedPullRequest) -> bool {
        pull_request.is_closed() && pull_request.targets(self.base_branch.as_deref())
    }
}

/// Gateway to the GitHub endpoints used while assembling release tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseGateway: Send + Sync {
    /// Lists the commits reachable from `head` but not from `base`, oldest
    /// first, across every page of the comparison.
    async fn compare_commits(
        &self,
        locator: &RepositoryLocator,
        base: &GitReference,
        head: &GitReference,
    ) -> Result<Vec<CommitSha>, ReleaseError>;

    /// Lists the pull requests associated with `sha` that pass `filter`.
    async fn pull_requests_for_commit(
        &self,
        locator: &RepositoryLocator,
        sha: &CommitSha,
        filter: &PullRequestFilter,
    ) -> Result<Vec<AssociatedPullRequest>, ReleaseError>;
}
