//! The release ticket list and its rendering.

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::github::error::ReleaseError;

use super::resolver::ResolvedPullRequest;
use super::ticket::TicketId;

/// Tickets delivered by a release, in the order their pull requests were
/// first resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseTickets {
    tickets: Vec<TicketId>,
    pull_requests: Vec<ResolvedPullRequest>,
    commits: usize,
}

impl ReleaseTickets {
    /// Builds the ticket list from resolved pull requests.
    ///
    /// Every pull request that carries a ticket contributes one entry, so a
    /// ticket referenced by two pull requests appears twice.
    #[must_use]
    pub fn assemble(commits: usize, pull_requests: Vec<ResolvedPullRequest>) -> Self {
        let tickets = pull_requests
            .iter()
            .filter_map(|pull_request| pull_request.ticket.clone())
            .collect();

        Self {
            tickets,
            pull_requests,
            commits,
        }
    }

    /// Tickets in pull request resolution order.
    #[must_use]
    pub fn tickets(&self) -> &[TicketId] {
        &self.tickets
    }

    /// Every inspected pull request in processing order.
    #[must_use]
    pub fn pull_requests(&self) -> &[ResolvedPullRequest] {
        &self.pull_requests
    }

    /// Number of commits the comparison returned.
    #[must_use]
    pub const fn commit_count(&self) -> usize {
        self.commits
    }
}

/// How the final ticket list is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable summary line.
    #[default]
    Text,
    /// A JSON document with tickets, pull requests, and commit count.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ReleaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ReleaseError::Configuration {
                message: format!("unknown output format '{other}' (expected text or json)"),
            }),
        }
    }
}

/// Writes `report` to `writer` in the requested format.
///
/// # Errors
///
/// Returns [`ReleaseError::Io`] when writing fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &ReleaseTickets,
    format: OutputFormat,
) -> Result<(), ReleaseError> {
    match format {
        OutputFormat::Text => {
            let listed = if report.tickets.is_empty() {
                "none".to_owned()
            } else {
                report
                    .tickets
                    .iter()
                    .map(TicketId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(writer, "VersionOne stories: {listed}").map_err(|error| io_error(&error))
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report).map_err(|error| {
                ReleaseError::Io {
                    message: error.to_string(),
                }
            })?;
            writeln!(writer).map_err(|error| io_error(&error))
        }
    }
}

fn io_error(error: &std::io::Error) -> ReleaseError {
    ReleaseError::Io {
        message: error.to_string(),
    }
}
