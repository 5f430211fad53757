use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::validation::{FieldErrors, Validate, Validator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("email", "Email", &self.email)
            .email("email", "Email", &self.email)
            .required("password", "Password", &self.password)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
}
