//! Support code for release ticket behavioural tests.

mod state;

pub use state::{ReleaseState, SharedRuntime};

use std::sync::Mutex;

use release_tickets::github::{GitReference, PullRequestFilter};
use release_tickets::telemetry::{ReleaseEvent, TelemetrySink};
use release_tickets::{
    OctocrabReleaseGateway, PersonalAccessToken, ReleaseError, ReleaseRequest,
    ReleaseTicketCollector, ReleaseTickets, RepositoryLocator, TicketExtractor,
};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Telemetry sink keeping every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ReleaseEvent>>,
}

impl RecordingSink {
    fn into_events(self) -> Vec<ReleaseEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TelemetrySink for RecordingSink {
    fn record(&self, event: ReleaseEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

/// Ensures the runtime and server are initialised in `ReleaseState`.
///
/// # Errors
///
/// Returns [`ReleaseError::Io`] when the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(state: &ReleaseState) -> Result<SharedRuntime, ReleaseError> {
    if state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new().map_err(|error| ReleaseError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })?;
        state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = state.runtime.get().ok_or_else(|| ReleaseError::Api {
        message: "runtime not initialised".to_owned(),
    })?;

    if state.server.with_ref(|_| ()).is_none() {
        state.server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Mounts `mock` on the scenario's server.
///
/// # Errors
///
/// Returns [`ReleaseError::Api`] when the server has not been started.
pub fn mount(state: &ReleaseState, mock: Mock) -> Result<(), ReleaseError> {
    let runtime = ensure_runtime_and_server(state)?;
    state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or_else(|| ReleaseError::Api {
            message: "mock server not initialised".to_owned(),
        })
}

/// Strips the quotes Gherkin steps carry around free-text values.
pub fn unquote(value: &str) -> String {
    value.trim().trim_matches('"').to_owned()
}

/// Builds a compare-commits response for a comma separated SHA list.
pub fn commits_body(shas: &str) -> Value {
    let commits: Vec<Value> = shas
        .split(',')
        .map(str::trim)
        .filter(|sha| !sha.is_empty())
        .map(|sha| json!({ "sha": sha }))
        .collect();

    json!({
        "status": if commits.is_empty() { "identical" } else { "ahead" },
        "total_commits": commits.len(),
        "commits": commits
    })
}

/// Runs the collector against the scenario's mock server.
///
/// The outer result reports harness failures; the inner one is the outcome
/// under test. Recorded events are stored on `state` either way.
///
/// # Errors
///
/// Returns an error when the runtime, server, or token were not set up.
pub fn run_collection(
    state: &ReleaseState,
    branch: &str,
    base: &str,
    head: &str,
) -> Result<Result<ReleaseTickets, ReleaseError>, ReleaseError> {
    let runtime = ensure_runtime_and_server(state)?;
    let server_url = state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| ReleaseError::InvalidUrl("mock server URL missing".to_owned()))?;
    let token_value = state.token.get().ok_or(ReleaseError::MissingToken)?;

    let request = ReleaseRequest {
        locator: RepositoryLocator::on_host(&server_url, "acme", "widgets")?,
        previous: GitReference::new(base, "previous")?,
        current: GitReference::new(head, "current")?,
        filter: PullRequestFilter::closed_into(branch),
    };
    let extractor = TicketExtractor::new()?;
    let sink = RecordingSink::default();

    let outcome = runtime.block_on(async {
        let token = PersonalAccessToken::new(token_value)?;
        let gateway = OctocrabReleaseGateway::for_token(&token, &request.locator)?;
        ReleaseTicketCollector::new(&gateway, &extractor, &sink)
            .collect(&request)
            .await
    });

    state.events.set(sink.into_events());
    Ok(outcome)
}
