use common::models::{BiographyForm, JournalistProfile, ProfessionalInfoForm, ProfileBasicInfoForm};
use reqwest::Method;

use crate::http::{ApiClient, Upload};
use crate::request::PendingRequest;

/// `/journalists`: the signed-in journalist's profile.
pub struct JournalistService {
    client: ApiClient,
}

impl JournalistService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn me(&self) -> PendingRequest<JournalistProfile> {
        self.client.get("/journalists/me")
    }

    /// Basic info goes up as multipart so a new avatar can ride along.
    pub fn update_file(&self, form: &ProfileBasicInfoForm) -> PendingRequest<JournalistProfile> {
        ApiClient::validated(form, || {
            let mut upload = Upload::new()
                .text("firstName", form.first_name.trim())
                .text("lastName", form.last_name.trim())
                .text("phoneNumber", form.phone_number.trim())
                .text_opt("gender", form.gender.as_deref())
                .text("regionUuid", form.region_uuid.as_str());
            if let Some(avatar) = &form.avatar {
                upload = upload.file("avatar", avatar.clone());
            }
            self.client
                .send_upload(Method::PUT, "/journalists/update-file", upload)
        })
    }

    pub fn update_professional_info(
        &self,
        form: &ProfessionalInfoForm,
    ) -> PendingRequest<JournalistProfile> {
        self.client
            .send_form(Method::PUT, "/journalists/professional-info", form)
    }

    pub fn update_biography(&self, form: &BiographyForm) -> PendingRequest<JournalistProfile> {
        self.client
            .send_form(Method::PUT, "/journalists/biography", form)
    }
}
