//! Release ticket collection.
//!
//! A run compares two references, resolves each introduced commit to the
//! closed pull requests that merged it, and extracts one ticket per pull
//! request:
//!
//! - [`differ`]: compare-commits into a [`CommitDiff`]
//! - [`resolver`]: commits to distinct pull requests and their tickets
//! - [`ticket`]: the ticket pattern
//! - [`report`]: the final [`ReleaseTickets`] list and its output formats
//!
//! Commits are processed in the order GitHub returns them, so repeated runs
//! over the same history yield the same list.

pub mod differ;
pub mod report;
pub mod resolver;
pub mod ticket;

pub use differ::{CommitDiff, CommitDiffer};
pub use report::{OutputFormat, ReleaseTickets, write_report};
pub use resolver::{PullRequestResolver, ResolvedPullRequest};
pub use ticket::{TICKET_PATTERN, TicketExtractor, TicketId};

use crate::github::error::ReleaseError;
use crate::github::gateway::{PullRequestFilter, ReleaseGateway};
use crate::github::locator::{GitReference, RepositoryLocator};
use crate::telemetry::TelemetrySink;

/// Everything needed to collect tickets for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Repository to compare in.
    pub locator: RepositoryLocator,
    /// Reference of the previous deployment.
    pub previous: GitReference,
    /// Reference being deployed.
    pub current: GitReference,
    /// Pull request filter (closed, into the deployment branch).
    pub filter: PullRequestFilter,
}

/// Runs the comparison, resolution, and extraction stages in sequence.
pub struct ReleaseTicketCollector<'a, Gateway>
where
    Gateway: ReleaseGateway,
{
    gateway: &'a Gateway,
    extractor: &'a TicketExtractor,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a, Gateway> ReleaseTicketCollector<'a, Gateway>
where
    Gateway: ReleaseGateway,
{
    /// Create a collector using the provided gateway, extractor, and sink.
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

    /// Collects the tickets delivered between the request's references.
    ///
    /// An empty comparison makes no pull request lookups.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from the underlying gateway, including
    /// GitHub authentication errors, unknown references, rate limiting, or
    /// network problems. No partial list is returned.
    pub async fn collect(&self, request: &ReleaseRequest) -> Result<ReleaseTickets, ReleaseError> {
        let diff = CommitDiffer::new(self.gateway, self.telemetry)
            .diff(&request.locator, &request.previous, &request.current)
            .await?;

        let resolved = PullRequestResolver::new(self.gateway, self.extractor, self.telemetry)
            .resolve(&request.locator, &diff, &request.filter)
            .await?;

        Ok(ReleaseTickets::assemble(diff.len(), resolved))
    }
}
