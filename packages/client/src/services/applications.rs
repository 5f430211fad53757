use common::models::{
    ApplicationAward, ApplicationFilter, AttachmentsForm, BasicInfoForm, BasicInfoRequest,
    CollaboratorsForm, CollaboratorsRequest, ListParams, MediaInfoForm, Paginated, ReviewForm,
};
use common::status::ApplicationStatus;
use reqwest::Method;
use serde::Serialize;

use crate::http::{ApiClient, Upload};
use crate::request::PendingRequest;

#[derive(Serialize)]
struct StatusBody {
    status: ApplicationStatus,
}

/// `/applications`: the application wizard steps plus admin review actions.
pub struct ApplicationService {
    client: ApiClient,
}

impl ApplicationService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn list(
        &self,
        params: &ListParams,
        filter: &ApplicationFilter,
    ) -> PendingRequest<Paginated<ApplicationAward>> {
        self.client.get_filtered("/applications", params, filter)
    }

    pub fn show(&self, uuid: &str) -> PendingRequest<ApplicationAward> {
        self.client.get(&format!("/applications/{uuid}"))
    }

    /// Create the application (`uuid` is `None`) or update its basic info.
    pub fn save_basic_info(
        &self,
        uuid: Option<&str>,
        form: &BasicInfoForm,
    ) -> PendingRequest<ApplicationAward> {
        let method = if uuid.is_some() { Method::PUT } else { Method::POST };
        ApiClient::validated(form, || {
            self.client.send_json(
                method,
                "/applications/basic-info",
                &BasicInfoRequest { uuid, form },
            )
        })
    }

    pub fn update_media_info(
        &self,
        uuid: &str,
        form: &MediaInfoForm,
    ) -> PendingRequest<ApplicationAward> {
        self.client
            .send_form(Method::PUT, &format!("/applications/media-info/{uuid}"), form)
    }

    pub fn upload_attachments(
        &self,
        uuid: &str,
        form: &AttachmentsForm,
    ) -> PendingRequest<ApplicationAward> {
        ApiClient::validated(form, || {
            let upload = form
                .files
                .iter()
                .fold(Upload::new(), |upload, file| upload.file("files", file.clone()));
            self.client.send_upload(
                Method::POST,
                &format!("/applications/attachments/{uuid}"),
                upload,
            )
        })
    }

    pub fn save_collaborators(
        &self,
        uuid: &str,
        form: &CollaboratorsForm,
    ) -> PendingRequest<ApplicationAward> {
        ApiClient::validated(form, || {
            self.client.send_json(
                Method::POST,
                "/applications/collaborators",
                &CollaboratorsRequest {
                    application_uuid: uuid,
                    members: &form.members,
                },
            )
        })
    }

    pub fn remove_member(&self, member_uuid: &str) -> PendingRequest<()> {
        self.client
            .delete(&format!("/applications/member/{member_uuid}"))
    }

    /// Final wizard step; the declaration must be confirmed.
    pub fn submit(&self, uuid: &str, form: &ReviewForm) -> PendingRequest<ApplicationAward> {
        ApiClient::validated(form, || {
            tracing::info!(uuid, "Submitting application");
            self.client
                .send_json(Method::PUT, &format!("/applications/submit/{uuid}"), form)
        })
    }

    pub fn set_status(
        &self,
        uuid: &str,
        status: ApplicationStatus,
    ) -> PendingRequest<ApplicationAward> {
        tracing::info!(uuid, %status, "Changing application status");
        self.client.send_json(
            Method::PUT,
            &format!("/applications/status/{uuid}"),
            &StatusBody { status },
        )
    }

    pub fn delete(&self, uuid: &str) -> PendingRequest<()> {
        tracing::info!(uuid, "Deleting application");
        self.client.delete(&format!("/applications/{uuid}"))
    }
}
