//! Octocrab implementation of the release gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::error::ReleaseError;
use crate::github::locator::{CommitSha, GitReference, PersonalAccessToken, RepositoryLocator};
use crate::github::models::{
    ApiComparison, ApiPullRequest, AssociatedPullRequest, ComparisonPage,
};
use crate::github::rate_limit::RateLimitInfo;

use super::client::build_octocrab_client;
use super::error_mapping::{is_rate_limit_error, map_octocrab_error};
use super::{PullRequestFilter, ReleaseGateway};

/// Commits requested per compare-commits page.
pub const COMPARE_PAGE_SIZE: u8 = 100;

const PULLS_PAGE_SIZE: &str = "100";

/// Octocrab-backed release gateway.
pub struct OctocrabReleaseGateway {
    client: Octocrab,
}

impl OctocrabReleaseGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidUrl` when the base URI cannot be parsed or
    /// `ReleaseError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, ReleaseError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }

    async fn fetch_comparison_page(
        &self,
        path: &str,
        page: u32,
    ) -> Result<ComparisonPage, ReleaseError> {
        let page_str = page.to_string();
        let per_page_str = COMPARE_PAGE_SIZE.to_string();
        let query_params = [
            ("page", page_str.as_str()),
            ("per_page", per_page_str.as_str()),
        ];

        match self
            .client
            .get::<ApiComparison, _, _>(path, Some(&query_params))
            .await
        {
            Ok(comparison) => Ok(comparison.into()),
            Err(error) => Err(self
                .map_octocrab_error_with_rate_limit("compare commits", &error)
                .await),
        }
    }

    async fn map_octocrab_error_with_rate_limit(
        &self,
        operation: &str,
        error: &octocrab::Error,
    ) -> ReleaseError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
                let rate_limit = self.fetch_rate_limit_info().await;
                let base_message =
                    format!("{operation} failed: {message}", message = source.message);
                let message = match &rate_limit {
                    Some(info) => format!(
                        "{base_message} ({remaining} of {limit} requests left, resets at {reset})",
                        remaining = info.remaining(),
                        limit = info.limit(),
                        reset = info.reset_at()
                    ),
                    None => base_message,
                };

                ReleaseError::RateLimitExceeded {
                    rate_limit,
                    message,
                }
            }
            _ => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}

/// Returns true once every commit GitHub reported has been collected.
///
/// A short page also ends the walk so a missing or inconsistent
/// `total_commits` cannot loop forever.
fn comparison_complete(collected: usize, page_len: usize, total: Option<u64>) -> bool {
    if page_len < usize::from(COMPARE_PAGE_SIZE) {
        return true;
    }
    let collected_count = u64::try_from(collected).unwrap_or(u64::MAX);
    total.is_none_or(|expected| collected_count >= expected)
}

#[async_trait]
impl ReleaseGateway for OctocrabReleaseGateway {
    async fn compare_commits(
        &self,
        locator: &RepositoryLocator,
        base: &GitReference,
        head: &GitReference,
    ) -> Result<Vec<CommitSha>, ReleaseError> {
        let path = locator.compare_path(base, head);
        let mut commits = Vec::new();
        let mut page = 1_u32;

        loop {
            let result = self.fetch_comparison_page(&path, page).await?;
            let page_len = result.commits.len();
            commits.extend(result.commits);

            if comparison_complete(commits.len(), page_len, result.total_commits) {
                break;
            }
            page = page.saturating_add(1);
        }

        Ok(commits)
    }

    async fn pull_requests_for_commit(
        &self,
        locator: &RepositoryLocator,
        sha: &CommitSha,
        filter: &PullRequestFilter,
    ) -> Result<Vec<AssociatedPullRequest>, ReleaseError> {
        let mut query_params = vec![("state", filter.state()), ("per_page", PULLS_PAGE_SIZE)];
        if let Some(branch) = filter.base_branch.as_deref() {
            query_params.push(("base", branch));
        }

        let first_page = match self
            .client
            .get::<Page<ApiPullRequest>, _, _>(locator.commit_pulls_path(sha), Some(&query_params))
            .await
        {
            Ok(page) => page,
            Err(error) => {
                return Err(self
                    .map_octocrab_error_with_rate_limit("list pull requests for commit", &error)
                    .await);
            }
        };

        let pull_requests = match self.client.all_pages(first_page).await {
            Ok(pull_requests) => pull_requests,
            Err(error) => {
                return Err(self
                    .map_octocrab_error_with_rate_limit("list pull requests for commit", &error)
                    .await);
            }
        };

        Ok(pull_requests
            .into_iter()
            .map(AssociatedPullRequest::from)
            .filter(|pull_request| filter.accepts(pull_request))
            .collect())
    }
}
