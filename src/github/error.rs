//! Error types exposed by the release ticket pipeline.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while loading configuration or communicating with GitHub.
///
/// Every variant is fatal for a run: the pipeline stops at the first error
/// and no partial ticket list is reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseError {
    /// A required setting was not supplied by any configuration layer.
    #[error("{setting} is required (use {flag})")]
    MissingSetting {
        /// Human-readable setting name, e.g. `repository owner`.
        setting: &'static str,
        /// CLI flag that supplies the setting.
        flag: &'static str,
    },

    /// A git reference was blank or contained whitespace.
    #[error("{role} reference must be a non-blank name without whitespace")]
    BlankReference {
        /// Which side of the comparison the reference belongs to.
        role: &'static str,
    },

    /// The repository owner or name was blank.
    #[error("repository owner and name must not be blank")]
    InvalidRepository,

    /// The API base URL could not be parsed.
    #[error("GitHub API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required (set GITHUB_TOKEN or use --token)")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub could not find the repository, reference, or commit.
    #[error("GitHub could not find the requested resource: {message}")]
    NotFound {
        /// Operation and GitHub message describing what was missing.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Rate limit exceeded: the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if it could be fetched after the failure.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// The ticket pattern failed to compile.
    #[error("ticket pattern is invalid: {message}")]
    InvalidPattern {
        /// Error detail from the regex engine.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local repository discovery failed.
    #[error("local discovery: {message}")]
    LocalDiscovery {
        /// Details about the discovery failure.
        message: String,
    },
}
