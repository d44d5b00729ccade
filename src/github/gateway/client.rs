//! Octocrab client construction for the release gateway.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::ReleaseError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `ReleaseError::InvalidUrl` when the base URI cannot be parsed or
/// `ReleaseError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, ReleaseError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ReleaseError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| ReleaseError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
