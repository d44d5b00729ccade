//! Resolution of commits to the pull requests that merged them.

use std::collections::HashSet;

use serde::Serialize;

use crate::github::error::ReleaseError;
use crate::github::gateway::{PullRequestFilter, ReleaseGateway};
use crate::github::locator::RepositoryLocator;
use crate::telemetry::{ReleaseEvent, TelemetrySink};

use super::differ::CommitDiff;
use super::ticket::{TicketExtractor, TicketId};

/// Outcome of inspecting one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Ticket found in the description, if any.
    pub ticket: Option<TicketId>,
}

/// Walks a [`CommitDiff`] and extracts one ticket per distinct pull request.
pub struct PullRequestResolver<'a, Gateway>
where
    Gateway: ReleaseGateway,
{
    gateway: &'a Gateway,
    extractor: &'a TicketExtractor,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a, Gateway> PullRequestResolver<'a, Gateway>
where
    Gateway: ReleaseGateway,
{
    /// Creates a resolver over `gateway`.
    #[must_use]
    pub const fn new(
        gateway: &'a Gateway,
        extractor: &'a TicketExtractor,
        telemetry: &'a dyn TelemetrySink,
    ) -> Self {
        Self {
            gateway,
            extractor,
            telemetry,
        }
    }

    /// Resolves every commit in `diff`, in diff order.
    ///
    /// A pull request reached through several commits is inspected once, at
    /// its first appearance.
    ///
    /// # Errors
    ///
    /// Stops at the first gateway failure; results gathered so far are
    /// discarded.
    pub async fn resolve(
        &self,
        locator: &RepositoryLocator,
        diff: &CommitDiff,
        filter: &PullRequestFilter,
    ) -> Result<Vec<ResolvedPullRequest>, ReleaseError> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for sha in diff.iter() {
            self.telemetry.record(ReleaseEvent::ResolvingCommit {
                sha: sha.to_string(),
            });
            let pull_requests = self
                .gateway
                .pull_requests_for_commit(locator, sha, filter)
                .await?;

            for pull_request in pull_requests {
                if !seen.insert(pull_request.number) {
                    continue;
                }
                let number = pull_request.number;
                let body = pull_request.body_text();
                self.telemetry.record(ReleaseEvent::PullRequestIntroduced {
                    number,
                    body: body.to_owned(),
                });

                let ticket = self.extractor.extract(body);
                self.telemetry.record(match &ticket {
                    Some(found) => ReleaseEvent::TicketFound {
                        number,
                        ticket: found.to_string(),
                    },
                    None => ReleaseEvent::TicketMissing { number },
                });
                resolved.push(ResolvedPullRequest { number, ticket });
            }
        }

        Ok(resolved)
    }
}
