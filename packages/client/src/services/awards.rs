use common::models::{
    Award, AwardCategory, AwardCriteria, AwardForm, AwardInstruction, AwardJudge, AwardRound,
    ListParams, Paginated, UpdateAwardRequest,
};
use reqwest::Method;

use crate::http::ApiClient;
use crate::request::PendingRequest;

/// `/awards` and its per-award sub-resources.
pub struct AwardService {
    client: ApiClient,
}

impl AwardService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self, params: &ListParams) -> PendingRequest<Paginated<Award>> {
        self.client.get_query("/awards", params)
    }

    pub fn show(&self, uuid: &str) -> PendingRequest<Award> {
        self.client.get(&format!("/awards/{uuid}"))
    }

    pub fn create(&self, form: &AwardForm) -> PendingRequest<Award> {
        tracing::info!(title = %form.title, "Creating award");
        self.client.send_form(Method::POST, "/awards", form)
    }

    /// `PUT /awards` with the uuid carried in the body.
    pub fn update(&self, request: &UpdateAwardRequest) -> PendingRequest<Award> {
        self.client.send_json(Method::PUT, "/awards", request)
    }

    pub fn update_from_form(&self, uuid: &str, form: AwardForm) -> PendingRequest<Award> {
        ApiClient::validated(&form, || {
            self.update(&UpdateAwardRequest::from_form(uuid, form.clone()))
        })
    }

    pub fn set_published(&self, uuid: &str, published: bool) -> PendingRequest<Award> {
        tracing::info!(uuid, published, "Changing award publication");
        self.update(&UpdateAwardRequest::publish(uuid, published))
    }

    pub fn delete(&self, uuid: &str) -> PendingRequest<()> {
        tracing::info!(uuid, "Deleting award");
        self.client.delete(&format!("/awards/{uuid}"))
    }

    pub fn categories(&self, uuid: &str) -> PendingRequest<Vec<AwardCategory>> {
        self.client.get(&format!("/awards/categories/{uuid}"))
    }

    pub fn criterias(&self, uuid: &str) -> PendingRequest<Vec<AwardCriteria>> {
        self.client.get(&format!("/awards/criterias/{uuid}"))
    }

    pub fn judges(&self, uuid: &str) -> PendingRequest<Vec<AwardJudge>> {
        self.client.get(&format!("/awards/judges/{uuid}"))
    }

    pub fn rounds(&self, uuid: &str) -> PendingRequest<Vec<AwardRound>> {
        self.client.get(&format!("/awards/rounds/{uuid}"))
    }

    pub fn instructions(&self, uuid: &str) -> PendingRequest<Vec<AwardInstruction>> {
        self.client.get(&format!("/awards/instructions/{uuid}"))
    }
}
