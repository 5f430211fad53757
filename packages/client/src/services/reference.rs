use std::marker::PhantomData;

use common::models::{ListParams, Paginated, ReferenceRecord, WithUuid};
use reqwest::Method;

use crate::http::ApiClient;
use crate::request::PendingRequest;

/// CRUD over one kind of reference record (categories, regions, judges...).
pub struct ReferenceService<R> {
    client: ApiClient,
    _record: PhantomData<fn() -> R>,
}

impl<R: ReferenceRecord> ReferenceService<R> {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    pub fn list(&self, params: &ListParams) -> PendingRequest<Paginated<R>> {
        self.client.get_query(R::PATH, params)
    }

    pub fn show(&self, uuid: &str) -> PendingRequest<R> {
        self.client.get(&format!("{}/{uuid}", R::PATH))
    }

    pub fn create(&self, form: &R::Form) -> PendingRequest<R> {
        tracing::info!(kind = R::LABEL, "Creating record");
        self.client.send_form(Method::POST, R::PATH, form)
    }

    pub fn update(&self, uuid: &str, form: &R::Form) -> PendingRequest<R> {
        ApiClient::validated(form, || {
            self.client
                .send_json(Method::PUT, R::PATH, &WithUuid { uuid, form })
        })
    }

    pub fn delete(&self, uuid: &str) -> PendingRequest<()> {
        tracing::info!(kind = R::LABEL, uuid, "Deleting record");
        self.client.delete(&format!("{}/{uuid}", R::PATH))
    }
}
