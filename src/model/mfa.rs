use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MfaMethodDto {
    pub name: String,
    pub label: String,
    pub icon: String,
    pub registered: bool,
}

/// Second factor submitted after login.
#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct MfaValidateForm {
    pub mfa_method: String,
    pub code: String,
}

/// Registration form. Without `VALIDATE` a registration secret is issued; with it the
/// `code` is verified and the method registered.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct MfaRegisterForm {
    pub code: Option<String>,
    #[serde(rename = "VALIDATE")]
    pub validate: Option<String>,
}

/// Data needed by an authenticator app to set up the TOTP secret.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MfaRegistrationViewDto {
    pub auth_method: String,
    pub auth_title: String,
    pub secret: String,
    pub provisioning_uri: String,
    /// Base64 encoded PNG of `provisioning_uri`.
    pub qr_code: String,
    pub auth_description: String,
}

/// Description of the code input shown on the validation page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MfaValidationViewDto {
    pub auth_method: String,
    pub auth_description: String,
    pub otp_placeholder: String,
}
