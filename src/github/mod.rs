//! GitHub access for release comparisons.
//!
//! This module wraps Octocrab to compare two references and to list the pull
//! requests associated with a commit. Errors are mapped into user-friendly
//! variants so that callers can surface precise failures without exposing
//! Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::ReleaseError;
pub use gateway::{OctocrabReleaseGateway, PullRequestFilter, ReleaseGateway};
pub use locator::{
    CommitSha, GitReference, PersonalAccessToken, RepositoryLocator, RepositoryName,
    RepositoryOwner,
};
pub use models::{AssociatedPullRequest, ComparisonPage};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockReleaseGateway;
