use common::models::{
    AwardCategory, AwardCategoryForm, AwardCriteria, AwardCriteriaForm, AwardInstruction,
    AwardInstructionForm, AwardJudge, AwardJudgeForm, AwardRound, RoundForm, WithUuid,
};
use reqwest::Method;

use crate::http::ApiClient;
use crate::request::PendingRequest;

/// Join records attaching categories, criteria, judges, instructions and rounds to an award.
pub struct AwardPartService {
    client: ApiClient,
}

impl AwardPartService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn add_category(&self, form: &AwardCategoryForm) -> PendingRequest<AwardCategory> {
        self.client.send_form(Method::POST, "/award-categories", form)
    }

    pub fn remove_category(&self, uuid: &str) -> PendingRequest<()> {
        self.client.delete(&format!("/award-categories/{uuid}"))
    }

    pub fn add_criteria(&self, form: &AwardCriteriaForm) -> PendingRequest<AwardCriteria> {
        self.client.send_form(Method::POST, "/award-criterias", form)
    }

    pub fn remove_criteria(&self, uuid: &str) -> PendingRequest<()> {
        self.client.delete(&format!("/award-criterias/{uuid}"))
    }

    pub fn add_judge(&self, form: &AwardJudgeForm) -> PendingRequest<AwardJudge> {
        self.client.send_form(Method::POST, "/award-judges", form)
    }

    pub fn remove_judge(&self, uuid: &str) -> PendingRequest<()> {
        self.client.delete(&format!("/award-judges/{uuid}"))
    }

    pub fn add_instruction(&self, form: &AwardInstructionForm) -> PendingRequest<AwardInstruction> {
        self.client.send_form(Method::POST, "/award-instructions", form)
    }

    pub fn remove_instruction(&self, uuid: &str) -> PendingRequest<()> {
        self.client.delete(&format!("/award-instructions/{uuid}"))
    }

    pub fn add_round(&self, form: &RoundForm) -> PendingRequest<AwardRound> {
        tracing::info!(award = %form.award_uuid, number = form.number, "Adding round");
        self.client.send_form(Method::POST, "/award-rounds", form)
    }

    pub fn update_round(&self, uuid: &str, form: &RoundForm) -> PendingRequest<AwardRound> {
        ApiClient::validated(form, || {
            self.client
                .send_json(Method::PUT, "/award-rounds", &WithUuid { uuid, form })
        })
    }

    pub fn remove_round(&self, uuid: &str) -> PendingRequest<()> {
        self.client.delete(&format!("/award-rounds/{uuid}"))
    }
}
