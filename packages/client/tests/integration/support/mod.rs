use client::ApiClient;
use common::role::Role;
use fake_api::FakeApi;

pub mod routes {
    pub const LOGIN: &str = "/auth/login";
    pub const AWARDS: &str = "/awards";
    pub const APPLICATIONS: &str = "/applications";
    pub const BASIC_INFO: &str = "/applications/basic-info";

    pub fn award(uuid: &str) -> String {
        format!("/awards/{uuid}")
    }

    pub fn attachments(uuid: &str) -> String {
        format!("/applications/attachments/{uuid}")
    }

    pub fn submit(uuid: &str) -> String {
        format!("/applications/submit/{uuid}")
    }
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

    /// A client carrying the seeded token for `role`.
    pub fn as_role(&self, role: Role) -> ApiClient {
        self.client.with_token(self.api.token_for(role))
    }
}
