//! Release ticket collection from GitHub pull request history.
//!
//! The library compares two git references through the GitHub API, finds the
//! closed pull requests that introduced each commit between them, and
//! extracts the `VersionOne Stories: <ticket>` identifier from every pull
//! request description. Errors are surfaced through [`ReleaseError`] so the
//! CLI can report them in one line.

pub mod config;
pub mod github;
pub mod local;
pub mod release;
pub mod telemetry;

pub use config::ReleaseConfig;
pub use github::{
    OctocrabReleaseGateway, PersonalAccessToken, ReleaseError, ReleaseGateway, RepositoryLocator,
};
pub use release::{
    OutputFormat, ReleaseRequest, ReleaseTicketCollector, ReleaseTickets, TicketExtractor,
    write_report,
};
pub use telemetry::{TelemetrySink, TracingTelemetrySink};
