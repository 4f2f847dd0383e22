use crate::server::{
    error::AppError,
    middleware::session::{AuthSession, FlashSession, MfaSession},
    model::auth::{AuthSourceKind, AuthSourceState, FlashCategory},
    util::crypto::derive_key,
};
use test_utils::builder::TestBuilder;

mod auth;
mod mfa;
