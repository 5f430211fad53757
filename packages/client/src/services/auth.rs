use common::models::{LoginForm, LoginResponse};
use reqwest::Method;

use crate::http::ApiClient;
use crate::request::PendingRequest;

pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    pub fn login(&self, form: &LoginForm) -> PendingRequest<LoginResponse> {
        tracing::info!(email = %form.email, "Signing in");
        self.client.send_form(Method::POST, "/auth/login", form)
    }
}
