//! Commit comparison between two references.

use std::collections::HashSet;

use crate::github::error::ReleaseError;
use crate::github::gateway::ReleaseGateway;
use crate::github::locator::{CommitSha, GitReference, RepositoryLocator};
use crate::telemetry::{ReleaseEvent, TelemetrySink};

/// Distinct commits introduced by the newer reference, in comparison order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitDiff {
    commits: Vec<CommitSha>,
}

impl CommitDiff {
    /// Builds a diff, dropping repeated hashes while keeping first positions.
    #[must_use]
    pub fn from_commits(commits: impl IntoIterator<Item = CommitSha>) -> Self {
        let mut seen = HashSet::new();
        let distinct = commits
            .into_iter()
            .filter(|sha| seen.insert(sha.clone()))
            .collect();
        Self { commits: distinct }
    }

    /// Number of distinct commits.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commits.len()
    }

    /// Returns true when both references point at the same history.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Iterates commits oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CommitSha> {
        self.commits.iter()
    }
}

/// Asks the gateway which commits separate two references.
pub struct CommitDiffer<'a, Gateway>
where
    Gateway: ReleaseGateway,
{
    gateway: &'a Gateway,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a, Gateway> CommitDiffer<'a, Gateway>
where
    Gateway: ReleaseGateway,
{
    /// Creates a differ over `gateway`.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, telemetry: &'a dyn TelemetrySink) -> Self {
        Self { gateway, telemetry }
    }

    /// Compares `previous` with `current`.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure unchanged.
    pub async fn diff(
        &self,
        locator: &RepositoryLocator,
        previous: &GitReference,
        current: &GitReference,
    ) -> Result<CommitDiff, ReleaseError> {
        let commits = self
            .gateway
            .compare_commits(locator, previous, current)
            .await?;
        let diff = CommitDiff::from_commits(commits);

        for sha in diff.iter() {
            self.telemetry.record(ReleaseEvent::CommitIntroduced {
                sha: sha.to_string(),
                previous: previous.to_string(),
            });
        }
        self.telemetry.record(ReleaseEvent::CommitsCompared {
            previous: previous.to_string(),
            current: current.to_string(),
            commits: diff.len(),
        });

        Ok(diff)
    }
}
