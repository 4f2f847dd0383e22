//! Time-based one-time passwords for authenticator apps.
//!
//! Codes have 6 digits, a 30 second step and use HMAC-SHA1 over a 160-bit secret that is
//! exchanged as 32 base32 characters. Only the code of the current step is accepted.

use std::{
    io::Cursor,
    time::{SystemTime, UNIX_EPOCH},
};

use base32::Alphabet;
use base64::{prelude::BASE64_STANDARD, Engine};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use totp_lite::{totp_custom, Sha1};
use tower_sessions::Session;
use url::Url;

use sea_orm::DatabaseConnection;

use crate::{
    model::mfa::{MfaRegisterForm, MfaRegistrationViewDto, MfaValidationViewDto},
    server::{
        data::user_mfa::UserMfaRepository,
        error::{internal::InternalError, AppError},
        middleware::session::{FlashSession, MfaSession},
        model::{auth::FlashCategory, user::User},
        util::random::random_bytes,
    },
};

pub const TOTP_AUTH_METHOD: &str = "authenticator";
pub const TOTP_AUTH_LABEL: &str = "Authenticator App";
pub const TOTP_AUTH_ICON: &str = "/mfa/static/images/totp_lock.svg";

const TOTP_STEP: u64 = 30;
const TOTP_DIGITS: u32 = 6;
const SECRET_BYTES: usize = 20;
const SECRET_ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };
const QR_CODE_SIZE: u32 = 200;

const NOT_REGISTERED: &str =
    "User has not registered the Time-based One-Time Password (TOTP) Authenticator for authentication.";
const MISSING_SECRET: &str = "User does not have valid HASH to generate the OTP.";
const INVALID_CODE: &str = "Invalid Code";
const REGISTRATION_FAILED: &str = "Failed to validate the code";
const REGISTRATION_SUCCEEDED: &str =
    "TOTP Authenticator registered successfully for authentication.";

/// New random secret, base32 encoded.
pub fn generate_secret() -> String {
    base32::encode(SECRET_ALPHABET, &random_bytes(SECRET_BYTES))
}

/// Code for `secret` at `timestamp` (seconds since the epoch); `None` for a malformed secret.
pub fn code_at(secret: &str, timestamp: u64) -> Option<String> {
    let key = base32::decode(SECRET_ALPHABET, secret.trim_end_matches('='))?;

    Some(totp_custom::<Sha1>(TOTP_STEP, TOTP_DIGITS, &key, timestamp))
}

/// Checks `code` against the current time step.
pub fn verify_code(secret: &str, code: &str) -> bool {
    let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return false;
    };

    code_at(secret, now.as_secs())
        .map(|expected| expected == code.trim())
        .unwrap_or(false)
}

/// `otpauth://` URI understood by authenticator apps.
pub fn provisioning_uri(secret: &str, account: &str, issuer: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse("otpauth://totp/")?;
    url.set_path(&format!("{}:{}", issuer, account));
    url.query_pairs_mut()
        .append_pair("secret", secret)
        .append_pair("issuer", issuer);

    Ok(url)
}

/// QR code of `uri` as a base64 encoded PNG, ready for a `data:image/png;base64,` source.
pub fn qr_code_png(uri: &str) -> Result<String, AppError> {
    let code = QrCode::new(uri.as_bytes()).map_err(InternalError::from)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_CODE_SIZE, QR_CODE_SIZE)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(InternalError::from)?;

    Ok(BASE64_STANDARD.encode(png))
}

pub struct TotpAuthenticator<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> TotpAuthenticator<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Checks a code against the user's registered secret.
    ///
    /// # Returns
    /// - `Ok(Ok(()))` - Code accepted
    /// - `Ok(Err(message))` - Not registered, no secret, or wrong code
    pub async fn validate(&self, user_id: i32, code: &str) -> Result<Result<(), String>, AppError> {
        let Some(registration) = UserMfaRepository::new(self.db)
            .find(user_id, TOTP_AUTH_METHOD)
            .await?
        else {
            return Ok(Err(NOT_REGISTERED.to_string()));
        };

        let Some(secret) = registration.options.filter(|secret| !secret.is_empty()) else {
            return Ok(Err(MISSING_SECRET.to_string()));
        };

        if !verify_code(&secret, code) {
            return Ok(Err(INVALID_CODE.to_string()));
        }

        Ok(Ok(()))
    }

    pub fn validation_view(&self) -> MfaValidationViewDto {
        MfaValidationViewDto {
            auth_method: TOTP_AUTH_METHOD.to_string(),
            auth_description: "Enter the code shown in your authenticator application for TOTP (Time-based One-Time Password)".to_string(),
            otp_placeholder: "Enter code".to_string(),
        }
    }

    /// Runs one step of the registration.
    ///
    /// Without `VALIDATE` the view for a (possibly reused) session secret is returned. With
    /// it the code is checked against the session secret; on success the method is stored
    /// and `None` returned, otherwise the view is shown again.
    pub async fn registration_view(
        &self,
        user: &User,
        issuer: &str,
        form: &MfaRegisterForm,
    ) -> Result<Option<MfaRegistrationViewDto>, AppError> {
        if form.validate.is_none() {
            return self.setup_view(user, issuer).await.map(Some);
        }

        let mfa_session = MfaSession::new(self.session);
        let secret = mfa_session.get_authenticator_secret().await?;
        let code = form.code.as_deref().unwrap_or_default();

        let Some(secret) = secret.filter(|secret| verify_code(secret, code)) else {
            FlashSession::new(self.session)
                .push(FlashCategory::Danger, REGISTRATION_FAILED)
                .await?;
            return self.setup_view(user, issuer).await.map(Some);
        };

        UserMfaRepository::new(self.db)
            .upsert(user.id, TOTP_AUTH_METHOD, Some(secret))
            .await?;
        mfa_session.clear_authenticator_secret().await?;
        FlashSession::new(self.session)
            .push(FlashCategory::Success, REGISTRATION_SUCCEEDED)
            .await?;

        tracing::info!("User {} registered the TOTP authenticator", user.username);

        Ok(None)
    }

    async fn setup_view(&self, user: &User, issuer: &str) -> Result<MfaRegistrationViewDto, AppError> {
        let mfa_session = MfaSession::new(self.session);

        let secret = match mfa_session.get_authenticator_secret().await? {
            Some(secret) => secret,
            None => generate_secret(),
        };
        mfa_session.set_authenticator_secret(&secret).await?;

        let uri = provisioning_uri(&secret, &user.username, issuer).map_err(InternalError::from)?;
        let qr_code = qr_code_png(uri.as_str())?;

        Ok(MfaRegistrationViewDto {
            auth_method: TOTP_AUTH_METHOD.to_string(),
            auth_title: TOTP_AUTH_LABEL.to_string(),
            secret,
            provisioning_uri: uri.to_string(),
            qr_code,
            auth_description:
                "Scan the QR code and enter the code from the TOTP Authenticator application"
                    .to_string(),
        })
    }
}
