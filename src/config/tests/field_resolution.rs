//! Tests for field resolution methods (`resolve_token`,
//! `require_previous_ref`, `output_format`, `release_request`).

use std::path::PathBuf;

use rstest::rstest;

use super::helpers::complete_config;
use crate::ReleaseConfig;
use crate::github::{CommitSha, ReleaseError};
use crate::local::{LocalRepository, parse_github_remote};
use crate::release::OutputFormat;

fn checkout(remote: &str, head: Option<&str>) -> LocalRepository {
    LocalRepository::new(
        PathBuf::from("/work/widgets"),
        parse_github_remote(remote).expect("remote should parse"),
        head.map(CommitSha::new),
    )
}

#[rstest]
fn resolve_token_returns_value_when_present() {
    let config = ReleaseConfig {
        token: Some("my-token".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.resolve_token().ok(),
        Some("my-token".to_owned()),
        "should return the token"
    );
}

#[rstest]
fn resolve_token_falls_back_to_legacy_variable() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = ReleaseConfig::default();

    assert_eq!(
        config.resolve_token().ok(),
        Some("legacy-token".to_owned()),
        "GITHUB_TOKEN should be used when no token is configured"
    );
}

#[rstest]
fn resolve_token_returns_error_when_none() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = ReleaseConfig {
        token: Some("   ".to_owned()),
        ..Default::default()
    };

    assert_eq!(config.resolve_token(), Err(ReleaseError::MissingToken));
}

#[rstest]
fn require_previous_ref_reports_flag() {
    let config = ReleaseConfig::default();

    assert_eq!(
        config.require_previous_ref(),
        Err(ReleaseError::MissingSetting {
            setting: "previous reference",
            flag: "-prevRef",
        })
    );
}

#[rstest]
#[case::unset(None, OutputFormat::Text)]
#[case::text(Some("text"), OutputFormat::Text)]
#[case::json(Some("json"), OutputFormat::Json)]
fn output_format_parses_setting(#[case] format: Option<&str>, #[case] expected: OutputFormat) {
    let config = ReleaseConfig {
        format: format.map(str::to_owned),
        ..Default::default()
    };

    assert_eq!(config.output_format(), Ok(expected));
}

#[rstest]
fn output_format_rejects_unknown_value() {
    let config = ReleaseConfig {
        format: Some("csv".to_owned()),
        ..Default::default()
    };

    assert!(matches!(
        config.output_format(),
        Err(ReleaseError::Configuration { .. })
    ));
}

#[rstest]
#[case::named(Some("main"), Some("main"))]
#[case::blank(Some("  "), None)]
#[case::unset(None, None)]
fn pull_request_filter_follows_branch(
    #[case] branch: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let config = ReleaseConfig {
        branch: branch.map(str::to_owned),
        ..Default::default()
    };

    assert_eq!(
        config.pull_request_filter().base_branch.as_deref(),
        expected
    );
}

#[rstest]
fn release_request_uses_configured_values() {
    let request = complete_config()
        .release_request(None)
        .expect("request should assemble");

    assert_eq!(request.locator.to_string(), "acme/widgets");
    assert_eq!(
        request.locator.api_base().as_str(),
        "https://api.github.com/"
    );
    assert_eq!(request.previous.as_str(), "v1.0");
    assert_eq!(request.current.as_str(), "v1.1");
    assert_eq!(request.filter.base_branch.as_deref(), Some("main"));
}

#[rstest]
fn release_request_derives_enterprise_api_base() {
    let config = ReleaseConfig {
        github_url: Some("https://ghe.example.com".to_owned()),
        ..complete_config()
    };

    let request = config.release_request(None).expect("request should assemble");

    assert_eq!(
        request.locator.api_base().as_str(),
        "https://ghe.example.com/api/v3"
    );
}

#[rstest]
fn release_request_rejects_invalid_github_url() {
    let config = ReleaseConfig {
        github_url: Some("not a url".to_owned()),
        ..complete_config()
    };

    assert!(matches!(
        config.release_request(None),
        Err(ReleaseError::InvalidUrl(_))
    ));
}

#[rstest]
#[case::owner(
    ReleaseConfig { owner: None, ..complete_config() },
    ReleaseError::MissingSetting { setting: "repository owner", flag: "-owner" }
)]
#[case::repo(
    ReleaseConfig { repo: Some(String::new()), ..complete_config() },
    ReleaseError::MissingSetting { setting: "repository name", flag: "-repo" }
)]
#[case::previous(
    ReleaseConfig { prev_ref: None, ..complete_config() },
    ReleaseError::MissingSetting { setting: "previous reference", flag: "-prevRef" }
)]
#[case::current(
    ReleaseConfig { curr_ref: None, ..complete_config() },
    ReleaseError::MissingSetting { setting: "current reference", flag: "-currRef" }
)]
#[case::whitespace_reference(
    ReleaseConfig { prev_ref: Some("v1 .0".to_owned()), ..complete_config() },
    ReleaseError::BlankReference { role: "previous" }
)]
fn release_request_reports_missing_settings(
    #[case] config: ReleaseConfig,
    #[case] expected: ReleaseError,
) {
    assert_eq!(config.release_request(None), Err(expected));
}

#[rstest]
fn local_checkout_fills_repository_and_current_reference() {
    let config = ReleaseConfig {
        prev_ref: Some("v1.0".to_owned()),
        ..Default::default()
    };
    let local = checkout("git@github.com:acme/widgets.git", Some("c0ffee"));

    let request = config
        .release_request(Some(&local))
        .expect("request should assemble");

    assert_eq!(request.locator.to_string(), "acme/widgets");
    assert_eq!(request.current.as_str(), "c0ffee");
    assert_eq!(request.filter.base_branch, None);
}

#[rstest]
fn enterprise_origin_selects_enterprise_api() {
    let config = ReleaseConfig {
        prev_ref: Some("v1.0".to_owned()),
        curr_ref: Some("v1.1".to_owned()),
        ..Default::default()
    };
    let local = checkout("https://ghe.example.com/acme/widgets.git", None);

    let request = config
        .release_request(Some(&local))
        .expect("request should assemble");

    assert_eq!(
        request.locator.api_base().as_str(),
        "https://ghe.example.com/api/v3"
    );
}

#[rstest]
fn configured_repository_ignores_origin_host() {
    let local = checkout("https://ghe.example.com/other/repo.git", Some("c0ffee"));

    let request = complete_config()
        .release_request(Some(&local))
        .expect("request should assemble");

    assert_eq!(request.locator.to_string(), "acme/widgets");
    assert_eq!(
        request.locator.api_base().as_str(),
        "https://api.github.com/"
    );
    assert_eq!(request.current.as_str(), "v1.1", "configured ref wins");
}

#[rstest]
fn unborn_checkout_cannot_supply_current_reference() {
    let config = ReleaseConfig {
        owner: Some("acme".to_owned()),
        repo: Some("widgets".to_owned()),
        prev_ref: Some("v1.0".to_owned()),
        ..Default::default()
    };
    let local = checkout("git@github.com:acme/widgets.git", None);

    assert!(matches!(
        config.release_request(Some(&local)),
        Err(ReleaseError::MissingSetting {
            setting: "current reference",
            ..
        })
    ));
}
