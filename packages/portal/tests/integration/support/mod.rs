use client::ApiClient;
use common::role::Role;
use common::status::ApplicationStatus;
use fake_api::FakeApi;

pub mod routes {
    pub const UPDATE_FILE: &str = "/journalists/update-file";
    pub const PROFESSIONAL_INFO: &str = "/journalists/professional-info";
    pub const BASIC_INFO: &str = "/applications/basic-info";
    pub const APPLICATIONS: &str = "/applications";
    pub const INITIALIZE_ROUND: &str = "/award-application-scores/initialize-round";
    pub const PROJECTS: &str = "/projects";
}

/// A fake API plus a client pointed at it.
pub struct TestApp {
    pub api: FakeApi,
    pub client: ApiClient,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let api = FakeApi::spawn().await;
        let client = ApiClient::new(&api.base_url()).expect("Failed to build client");
        Self { api, client }
    }

    pub fn as_role(&self, role: Role) -> ApiClient {
        self.client.with_token(self.api.token_for(role))
    }

    /// Award `a1` with rounds r1 and r2 (final), one approved and one
    /// pending application in screening.
    pub fn seed_two_round_award(&self) {
        self.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[("r1", 1, false), ("r2", 2, true)]);
            data.add_application("app-approved", "a1", None, ApplicationStatus::Approved);
            data.add_application("app-pending", "a1", None, ApplicationStatus::Pending);
        });
    }
}
