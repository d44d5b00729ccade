//! Maps Octocrab failures onto [`ReleaseError`] variants.

use http::StatusCode;

use crate::github::error::ReleaseError;

pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Rate limit responses are 403/429 whose message or documentation URL
/// mentions the rate limit.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_github_error(operation: &str, source: &octocrab::GitHubError) -> ReleaseError {
    let status = source.status_code;
    let message = &source.message;

    if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
        ReleaseError::NotFound {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    } else if is_auth_failure(status) {
        ReleaseError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        ReleaseError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ReleaseError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_github_error(operation, source);
    }

    if is_network_error(error) {
        return ReleaseError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ReleaseError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
