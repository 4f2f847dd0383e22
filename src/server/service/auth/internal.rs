//! Users stored in the catalog with an Argon2 password hash.

use crate::{
    model::auth::LoginForm,
    server::{
        data::user::UserRepository,
        error::AppError,
        model::{auth::AuthSourceKind, user::User},
        service::auth::{
            form_value, resolve_user, AuthContext, AuthOutcome, FieldErrors, Identity,
            LoginOutcome, Validation, ACCOUNT_DISABLED,
        },
        util::password::verify_password,
    },
};

const EMAIL_NOT_PROVIDED: &str = "Email not provided";
const PASSWORD_NOT_PROVIDED: &str = "Password not provided";
const USER_DOES_NOT_EXIST: &str = "Specified user does not exist";
const INVALID_PASSWORD: &str = "Invalid password";

pub struct InternalAuthSource<'a> {
    ctx: &'a AuthContext<'a>,
}

impl<'a> InternalAuthSource<'a> {
    pub fn new(ctx: &'a AuthContext<'a>) -> Self {
        Self { ctx }
    }

    /// Checks the form credentials against the catalog, recording field errors.
    pub async fn validate(
        &self,
        form: &LoginForm,
        errors: &mut FieldErrors,
    ) -> Result<Validation, AppError> {
        let Some(username) = form_value(&form.email) else {
            errors.add("email", EMAIL_NOT_PROVIDED);
            return Ok(Validation::Invalid(None));
        };
        let Some(password) = form.password.as_deref().filter(|p| !p.is_empty()) else {
            errors.add("password", PASSWORD_NOT_PROVIDED);
            return Ok(Validation::Invalid(None));
        };

        match self.check_credentials(username, password).await? {
            Ok(_) => Ok(Validation::Valid),
            Err((field, message)) => {
                errors.add(field, message);
                Ok(Validation::Invalid(None))
            }
        }
    }

    pub async fn authenticate(&self, form: &LoginForm) -> Result<AuthOutcome, AppError> {
        let (Some(username), Some(password)) = (form_value(&form.email), form.password.as_deref())
        else {
            return Ok(AuthOutcome::Failed(USER_DOES_NOT_EXIST.to_string()));
        };

        match self.check_credentials(username, password).await? {
            Ok(user) => Ok(AuthOutcome::Authenticated(Identity {
                username: user.username,
                email: user.email,
            })),
            Err((_, message)) => Ok(AuthOutcome::Failed(message.to_string())),
        }
    }

    pub async fn login(
        &self,
        identity: &Identity,
        form: &LoginForm,
    ) -> Result<LoginOutcome, AppError> {
        resolve_user(
            self.ctx,
            identity,
            AuthSourceKind::Internal,
            false,
            Some(form.password.as_deref().unwrap_or_default()),
        )
        .await
    }

    /// Looks up an active internal user with a matching password.
    ///
    /// # Returns
    /// - `Ok(Ok(User))` - Credentials match
    /// - `Ok(Err((field, message)))` - Rejected, with the form field to blame
    async fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Result<User, (&'static str, &'static str)>, AppError> {
        let user = UserRepository::new(self.ctx.db)
            .find_by_username_and_source(username, AuthSourceKind::Internal)
            .await?;

        let Some(user) = user else {
            return Ok(Err(("email", USER_DOES_NOT_EXIST)));
        };
        if !user.active {
            return Ok(Err(("email", ACCOUNT_DISABLED)));
        }

        let matches = user
            .password_hash
            .as_deref()
            .map(|hash| verify_password(password, hash))
            .unwrap_or(false);
        if !matches {
            return Ok(Err(("password", INVALID_PASSWORD)));
        }

        Ok(Ok(user))
    }
}
