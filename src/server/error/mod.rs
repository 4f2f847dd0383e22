//! Errors and their HTTP responses.
//!
//! `AppError` is the top-level error returned by every handler. Domain failures map to the
//! status codes the browser tree expects (400, 404, 410, 417, 422) and are rendered as the
//! standard JSON envelope with `success: 0`. Infrastructure failures are logged and reported
//! to the client as a generic 500.

pub mod auth;
pub mod config;
pub mod crypto;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{
    error::{auth::AuthError, config::ConfigError, crypto::CryptoError, internal::InternalError},
    util::response::JsonResponse,
};

/// Error returned by handlers, services and repositories.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing environment configuration.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error, mapped by `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Saved password could not be encrypted or decrypted.
    #[error(transparent)]
    CryptoErr(#[from] CryptoError),

    /// Unexpected state indicating a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Catalog query failed.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Session store read or write failed.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error, e.g. while reading the OAuth2 userinfo endpoint.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// LDAP connection or protocol error.
    #[error(transparent)]
    LdapErr(#[from] ldap3::LdapError),

    /// 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// 400 Bad Request.
    #[error("{0}")]
    BadRequest(String),

    /// 410 Gone, used when the addressed catalog object does not exist.
    #[error("{0}")]
    Gone(String),

    /// 417 Expectation Failed, used for rule violations such as deleting the default group.
    #[error("{0}")]
    ExpectationFailed(String),

    /// 422 for operations that do not apply to the node type.
    #[error("Operation not applicable")]
    NotApplicable,

    /// 500 with a message that is logged but never sent to the client.
    #[error("{0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => JsonResponse::error(StatusCode::NOT_FOUND, msg).into_response(),
            Self::BadRequest(msg) => {
                JsonResponse::error(StatusCode::BAD_REQUEST, msg).into_response()
            }
            Self::Gone(msg) => JsonResponse::error(StatusCode::GONE, msg).into_response(),
            Self::ExpectationFailed(msg) => {
                JsonResponse::error(StatusCode::EXPECTATION_FAILED, msg).into_response()
            }
            Self::NotApplicable => {
                JsonResponse::error(StatusCode::UNPROCESSABLE_ENTITY, "").into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                InternalServerError("Internal server error").into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wraps any displayable error into a logged 500 response with a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        JsonResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            .into_response()
    }
}
