//! Scenario state for release ticket behavioural tests.

use std::cell::RefCell;
use std::rc::Rc;

use release_tickets::telemetry::ReleaseEvent;
use release_tickets::{ReleaseError, ReleaseTickets};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Shared runtime wrapper that can be stored in rstest-bdd Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub struct ReleaseState {
    pub runtime: Slot<SharedRuntime>,
    pub server: Slot<MockServer>,
    pub token: Slot<String>,
    pub tickets: Slot<ReleaseTickets>,
    pub events: Slot<Vec<ReleaseEvent>>,
    pub error: Slot<ReleaseError>,
}
