use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    model::mfa::MfaRegisterForm,
    server::{
        config::Config,
        data::user_mfa::UserMfaRepository,
        error::AppError,
        middleware::session::{FlashSession, MfaSession},
        model::{auth::FlashCategory, user::User},
        service::mfa::{
            enabled_methods,
            totp::{code_at, generate_secret, provisioning_uri, qr_code_png},
            MfaMethod, MfaRegistration, MfaService,
        },
    },
};
use test_utils::{builder::TestBuilder, factory};

mod register;

/// Code of the current time step for `secret`.
fn current_code(secret: &str) -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
    code_at(secret, now.as_secs()).unwrap()
}
