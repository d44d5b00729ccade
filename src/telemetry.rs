//! Diagnostic events emitted while collecting release tickets.
//!
//! Pipeline stages never log directly. They receive a [`TelemetrySink`] and
//! record [`ReleaseEvent`]s on it; the binary wires in
//! [`TracingTelemetrySink`], which forwards events to `tracing` at the level
//! each event carries. The level gate itself is installed once from the
//! `LOG_LEVEL` environment variable by [`init_tracing`].

use std::env;
use std::io;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::github::error::ReleaseError;

/// Environment variable selecting diagnostic verbosity.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "info";

/// A structured diagnostic recorded by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReleaseEvent {
    /// A commit reachable from the current reference but not the previous one.
    CommitIntroduced {
        /// Commit hash.
        sha: String,
        /// Previous reference the commit is missing from.
        previous: String,
    },
    /// The comparison finished.
    CommitsCompared {
        /// Older reference.
        previous: String,
        /// Newer reference.
        current: String,
        /// Number of distinct commits between them.
        commits: usize,
    },
    /// Pull requests are being looked up for a commit.
    ResolvingCommit {
        /// Commit hash.
        sha: String,
    },
    /// A pull request was seen for the first time.
    PullRequestIntroduced {
        /// Pull request number.
        number: u64,
        /// Description text inspected for a ticket.
        body: String,
    },
    /// A ticket identifier was found in a pull request description.
    TicketFound {
        /// Pull request number.
        number: u64,
        /// Extracted ticket identifier.
        ticket: String,
    },
    /// A pull request description carried no ticket identifier.
    TicketMissing {
        /// Pull request number.
        number: u64,
    },
}

/// A sink that can record release events.
pub trait TelemetrySink: Send + Sync {
    /// Records an event.
    fn record(&self, event: ReleaseEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: ReleaseEvent) {}
}

/// Forwards events to `tracing`.
///
/// Missing tickets are reported at `info` so they show at the default level;
/// everything else is `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: ReleaseEvent) {
        match event {
            ReleaseEvent::CommitIntroduced { sha, previous } => {
                tracing::debug!("commit {sha} is not included in {previous}");
            }
            ReleaseEvent::CommitsCompared {
                previous,
                current,
                commits,
            } => {
                tracing::debug!("there are {commits} commits different between {previous} and {current}");
            }
            ReleaseEvent::ResolvingCommit { sha } => {
                tracing::debug!("finding pull requests for commit {sha}");
            }
            ReleaseEvent::PullRequestIntroduced { number, body } => {
                tracing::debug!("PR #{number} was introduced in this release");
                tracing::debug!("PR #{number} body: {body:?}");
            }
            ReleaseEvent::TicketFound { number, ticket } => {
                tracing::debug!("PR #{number} VersionOne story: {ticket}");
            }
            ReleaseEvent::TicketMissing { number } => {
                tracing::info!("no VersionOne story found for PR #{number}");
            }
        }
    }
}

/// Builds the filter directive for a `LOG_LEVEL` value.
///
/// A bare level (`debug`, `INFO`, ...) applies to this crate while other
/// crates stay at `warn`; anything containing `=` or `,` is used verbatim as
/// an `EnvFilter` directive. Blank or missing values select `info`.
#[must_use]
pub fn log_directive(raw: Option<&str>) -> String {
    let value = raw.map(str::trim).filter(|value| !value.is_empty());
    match value {
        Some(directive) if directive.contains('=') || directive.contains(',') => {
            directive.to_owned()
        }
        Some(level) => format!("warn,release_tickets={}", level.to_ascii_lowercase()),
        None => format!("warn,release_tickets={DEFAULT_LOG_LEVEL}"),
    }
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// # Errors
///
/// Returns [`ReleaseError::Configuration`] when `LOG_LEVEL` is not a valid
/// level or filter directive, or when a subscriber is already installed.
pub fn init_tracing() -> Result<(), ReleaseError> {
    let raw = env::var(LOG_LEVEL_ENV).ok();
    let filter = EnvFilter::try_new(log_directive(raw.as_deref())).map_err(|error| {
        ReleaseError::Configuration {
            message: format!("{LOG_LEVEL_ENV} is invalid: {error}"),
        }
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| ReleaseError::Configuration {
            message: format!("failed to install log subscriber: {error}"),
        })
}
