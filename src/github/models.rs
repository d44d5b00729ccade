//! Data models for comparisons and commit-associated pull requests.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use serde::Deserialize;

use super::locator::CommitSha;

/// Pull request returned by the pull-requests-for-commit endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociatedPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Description text, if the author wrote one.
    pub body: Option<String>,
    /// State (e.g. open, closed).
    pub state: Option<String>,
    /// Name of the branch the pull request targets.
    pub base_ref: Option<String>,
}

impl AssociatedPullRequest {
    /// Returns true when GitHub reports the pull request as closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.as_deref() == Some("closed")
    }

    /// Returns true when the pull request targets `branch`.
    ///
    /// A `None` branch matches every pull request.
    #[must_use]
    pub fn targets(&self, branch: Option<&str>) -> bool {
        branch.is_none_or(|name| self.base_ref.as_deref() == Some(name))
    }

    /// Description text, or an empty string when absent.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// One page of a compare-commits response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonPage {
    /// Commits on this page, oldest first.
    pub commits: Vec<CommitSha>,
    /// Total commits in the comparison across all pages.
    pub total_commits: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComparison {
    pub(super) total_commits: Option<u64>,
    #[serde(default)]
    pub(super) commits: Vec<ApiCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommit {
    pub(super) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) body: Option<String>,
    pub(super) state: Option<String>,
    pub(super) base: Option<ApiBranch>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiBranch {
    #[serde(rename = "ref")]
    pub(super) ref_name: Option<String>,
}

impl From<ApiComparison> for ComparisonPage {
    fn from(value: ApiComparison) -> Self {
        Self {
            commits: value
                .commits
                .into_iter()
                .map(|commit| CommitSha::new(commit.sha))
                .collect(),
            total_commits: value.total_commits,
        }
    }
}

impl From<ApiPullRequest> for AssociatedPullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            body: value.body,
            state: value.state,
            base_ref: value.base.and_then(|base| base.ref_name),
        }
    }
}
