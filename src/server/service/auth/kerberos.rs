//! Kerberos (SPNEGO) users.
//!
//! Negotiation is done by the fronting web server, which passes the authenticated
//! principal in a trusted header.

use crate::server::{
    error::AppError,
    model::auth::AuthSourceKind,
    service::auth::{resolve_user, AuthContext, AuthOutcome, Identity, LoginOutcome},
};

pub struct KerberosAuthSource<'a> {
    ctx: &'a AuthContext<'a>,
}

impl<'a> KerberosAuthSource<'a> {
    pub fn new(ctx: &'a AuthContext<'a>) -> Self {
        Self { ctx }
    }

    /// Uses the negotiated principal, or asks the client to negotiate one.
    pub fn authenticate(&self) -> AuthOutcome {
        let principal = self
            .ctx
            .kerberos_principal
            .map(str::trim)
            .filter(|principal| !principal.is_empty());

        match principal {
            Some(principal) => AuthOutcome::Authenticated(Identity {
                username: principal_username(principal, self.ctx.config.kerberos.keep_realm),
                email: None,
            }),
            None => AuthOutcome::Challenge,
        }
    }

    pub async fn login(&self, identity: &Identity) -> Result<LoginOutcome, AppError> {
        resolve_user(
            self.ctx,
            identity,
            AuthSourceKind::Kerberos,
            self.ctx.config.kerberos.auto_create_user,
            None,
        )
        .await
    }
}

/// Username for `principal`, with the `@REALM` suffix removed unless `keep_realm`.
pub fn principal_username(principal: &str, keep_realm: bool) -> String {
    if keep_realm {
        return principal.to_string();
    }

    principal
        .split_once('@')
        .map(|(name, _)| name)
        .unwrap_or(principal)
        .to_string()
}
