use common::models::{
    Project, ProjectDetailsForm, ProjectTeamForm, ProjectTimelineForm, WithUuid,
};
use reqwest::Method;

use crate::http::ApiClient;
use crate::request::PendingRequest;

pub struct ProjectService {
    client: ApiClient,
}

impl ProjectService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn show(&self, uuid: &str) -> PendingRequest<Project> {
        self.client.get(&format!("/projects/{uuid}"))
    }

    pub fn create(&self, form: &ProjectDetailsForm) -> PendingRequest<Project> {
        tracing::info!(title = %form.title, "Creating project");
        self.client.send_form(Method::POST, "/projects", form)
    }

    pub fn update_details(&self, uuid: &str, form: &ProjectDetailsForm) -> PendingRequest<Project> {
        ApiClient::validated(form, || {
            self.client
                .send_json(Method::PUT, "/projects", &WithUuid { uuid, form })
        })
    }

    pub fn update_timeline(&self, uuid: &str, form: &ProjectTimelineForm) -> PendingRequest<Project> {
        self.client
            .send_form(Method::PUT, &format!("/projects/timeline/{uuid}"), form)
    }

    pub fn update_team(&self, uuid: &str, form: &ProjectTeamForm) -> PendingRequest<Project> {
        self.client
            .send_form(Method::PUT, &format!("/projects/team/{uuid}"), form)
    }
}
