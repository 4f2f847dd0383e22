//! Tries the configured authentication sources in order.

use crate::{
    model::auth::LoginForm,
    server::{
        error::AppError,
        model::auth::{AuthSourceKind, AuthSourceState},
        service::auth::{
            internal::InternalAuthSource, kerberos::KerberosAuthSource, ldap::LdapAuthSource,
            oauth2::OAuth2AuthSource, AuthContext, AuthOutcome, Identity,
            LoginOutcome, Validation, ValidationFailure,
        },
    },
};

const NO_SOURCE: &str = "No authentication source is available.";

/// Sources to try for a login form.
///
/// Kerberos and OAuth2 take over the login page: when either is configured, the
/// password sources are only tried when the form was posted with the internal button,
/// and in that case the taking-over source is skipped.
pub fn update_auth_sources(
    sources: &[AuthSourceKind],
    internal_button: bool,
) -> Vec<AuthSourceKind> {
    let mut sources = sources.to_vec();

    for source in [AuthSourceKind::Kerberos, AuthSourceKind::OAuth2] {
        if !sources.contains(&source) {
            continue;
        }

        if internal_button {
            sources.retain(|s| *s != source);
        } else {
            sources.retain(|s| !matches!(s, AuthSourceKind::Internal | AuthSourceKind::Ldap));
        }
    }

    sources
}

pub struct AuthSourceManager<'a> {
    ctx: &'a AuthContext<'a>,
    auth_sources: Vec<AuthSourceKind>,
    /// Source tried last by `authenticate`.
    source: Option<AuthSourceKind>,
    current_source: AuthSourceKind,
    source_friendly_name: String,
    identity: Option<Identity>,
}

impl<'a> AuthSourceManager<'a> {
    pub fn new(ctx: &'a AuthContext<'a>, form: &LoginForm) -> Self {
        let auth_sources = update_auth_sources(
            &ctx.config.authentication_sources,
            form.internal_button.is_some(),
        );

        Self::with_sources(ctx, auth_sources)
    }

    /// Manager restricted to the given sources, e.g. the Kerberos login endpoint.
    pub fn with_sources(ctx: &'a AuthContext<'a>, auth_sources: Vec<AuthSourceKind>) -> Self {
        Self {
            ctx,
            auth_sources,
            source: None,
            current_source: AuthSourceKind::Internal,
            source_friendly_name: AuthSourceKind::Internal.to_string(),
            identity: None,
        }
    }

    /// Manager continuing a login that left for an external provider.
    pub fn resume(ctx: &'a AuthContext<'a>, state: AuthSourceState, identity: Identity) -> Self {
        Self {
            ctx,
            auth_sources: state.auth_sources,
            source: Some(state.current_source),
            current_source: state.current_source,
            source_friendly_name: state.source_friendly_name,
            identity: Some(identity),
        }
    }

    pub fn auth_sources(&self) -> &[AuthSourceKind] {
        &self.auth_sources
    }

    pub fn current_source(&self) -> AuthSourceKind {
        self.current_source
    }

    /// Validates the form, succeeding as soon as one source accepts it.
    ///
    /// # Returns
    /// - `Ok(Ok(()))` - A source accepted the form
    /// - `Ok(Err(ValidationFailure))` - Field errors of every source and the last message
    pub async fn validate(
        &self,
        form: &LoginForm,
    ) -> Result<Result<(), ValidationFailure>, AppError> {
        let mut failure = ValidationFailure::default();

        for source in &self.auth_sources {
            let validation = match source {
                AuthSourceKind::Internal => {
                    InternalAuthSource::new(self.ctx)
                        .validate(form, &mut failure.field_errors)
                        .await?
                }
                AuthSourceKind::Ldap => {
                    LdapAuthSource::new(self.ctx).validate(form, &mut failure.field_errors)
                }
                AuthSourceKind::Kerberos | AuthSourceKind::OAuth2 => Validation::Valid,
            };

            match validation {
                Validation::Valid => return Ok(Ok(())),
                Validation::Invalid(message) => failure.message = message,
            }
        }

        Ok(Err(failure))
    }

    /// Authenticates through the sources in order.
    ///
    /// The first success fixes `current_source` and the identity used by `login`.
    /// Redirects and challenges stop the loop since the client has to act first.
    pub async fn authenticate(&mut self, form: &LoginForm) -> Result<AuthOutcome, AppError> {
        let mut outcome = AuthOutcome::Failed(NO_SOURCE.to_string());

        for source in self.auth_sources.clone() {
            self.source = Some(source);
            tracing::debug!("Authentication initiated via source: {}", source);

            outcome = match source {
                AuthSourceKind::Internal => {
                    InternalAuthSource::new(self.ctx).authenticate(form).await?
                }
                AuthSourceKind::Ldap => LdapAuthSource::new(self.ctx).authenticate(form).await?,
                AuthSourceKind::Kerberos => KerberosAuthSource::new(self.ctx).authenticate(),
                AuthSourceKind::OAuth2 => OAuth2AuthSource::new(self.ctx).authenticate(),
            };

            match &outcome {
                AuthOutcome::Authenticated(identity) => {
                    self.current_source = source;
                    self.identity = Some(identity.clone());
                    return Ok(outcome);
                }
                AuthOutcome::Redirect { .. } | AuthOutcome::Challenge => {
                    self.current_source = source;
                    return Ok(outcome);
                }
                AuthOutcome::Failed(_) => {}
            }
        }

        Ok(outcome)
    }

    /// Logs in the identity established by `authenticate` through the chosen source.
    pub async fn login(&mut self, form: &LoginForm) -> Result<LoginOutcome, AppError> {
        let (Some(source), Some(identity)) = (self.source, self.identity.as_ref()) else {
            return Ok(LoginOutcome::Failed(NO_SOURCE.to_string()));
        };

        let outcome = match source {
            AuthSourceKind::Internal => {
                InternalAuthSource::new(self.ctx)
                    .login(identity, form)
                    .await?
            }
            AuthSourceKind::Ldap => LdapAuthSource::new(self.ctx).login(identity, form).await?,
            AuthSourceKind::Kerberos => KerberosAuthSource::new(self.ctx).login(identity).await?,
            AuthSourceKind::OAuth2 => OAuth2AuthSource::new(self.ctx).login(identity).await?,
        };

        if matches!(outcome, LoginOutcome::LoggedIn { .. }) {
            self.source_friendly_name = self.friendly_name(source);
            tracing::debug!(
                "Authentication and login successfully done via source: {}",
                source
            );
        }

        Ok(outcome)
    }

    pub fn as_state(&self) -> AuthSourceState {
        AuthSourceState {
            source_friendly_name: self.source_friendly_name.clone(),
            auth_sources: self.auth_sources.clone(),
            current_source: self.current_source,
        }
    }

    fn friendly_name(&self, source: AuthSourceKind) -> String {
        match (source, self.ctx.config.oauth2.as_ref()) {
            (AuthSourceKind::OAuth2, Some(config)) => config.name.clone(),
            _ => source.to_string(),
        }
    }
}
