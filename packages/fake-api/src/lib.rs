//! In-memory stand-in for the award-program API, served over HTTP for tests.
//!
//! It covers the endpoints the client calls with just enough behaviour to
//! exercise it: bearer auth, pagination, wizard stage bookkeeping and round
//! initialization. Tests can count hits, slow responses down and queue failures.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::time::Duration;

use common::role::Role;

pub use routes::build_router;
pub use state::{AppState, Data, PASSWORD, User};

/// A running fake API.
pub struct FakeApi {
    pub addr: SocketAddr,
    state: AppState,
}

impl FakeApi {
    pub async fn spawn() -> Self {
        Self::spawn_with(Data::seeded()).await
    }

    pub async fn spawn_with(data: Data) -> Self {
        let state = AppState::new(data);
        let app = build_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("fake API stopped: {}", e);
            }
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A signed token for the seeded user holding `role`.
    pub fn token_for(&self, role: Role) -> String {
        let user = self
            .state
            .data()
            .user(role)
            .cloned()
            .expect("Every role has a seeded user");
        auth::sign(&user).expect("Failed to sign token")
    }

    /// Requests received for `METHOD path`, e.g. `hits("PUT", "/journalists/update-file")`.
    pub fn hits(&self, method: &str, path: &str) -> u32 {
        self.state.hits(&format!("{method} {path}"))
    }

    pub fn total_hits(&self) -> u32 {
        self.state.total_hits()
    }

    /// Hold every response for `delay` before handling it.
    pub fn set_delay(&self, delay: Duration) {
        self.state.set_delay(delay);
    }

    /// Answer the next `METHOD path` request with an error instead of handling it.
    pub fn fail_next(&self, method: &str, path: &str, status: u16, message: &str) {
        self.state
            .fail_next(&format!("{method} {path}"), status, message);
    }

    pub fn with_data<R>(&self, f: impl FnOnce(&mut Data) -> R) -> R {
        f(&mut self.state.data())
    }
}
