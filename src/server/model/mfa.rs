//! MFA registration domain model.

#[derive(Debug, Clone, PartialEq)]
pub struct UserMfa {
    pub user_id: i32,
    /// Method name, e.g. `authenticator`.
    pub method: String,
    /// Method specific data; the base32 secret for the authenticator.
    pub options: Option<String>,
}

impl UserMfa {
    pub fn from_entity(entity: entity::user_mfa::Model) -> Self {
        Self {
            user_id: entity.user_id,
            method: entity.mfa_auth,
            options: entity.options,
        }
    }
}
