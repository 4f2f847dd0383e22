//! Per-user preferences.
//!
//! Only registered preferences can be read or written. A preference the user never set
//! reports its default, which may come from the configuration.

use serde_json::Value;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, data::user_preference::UserPreferenceRepository, error::AppError,
};

/// Value type of a registered preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreferenceKind {
    Boolean,
}

impl PreferenceKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Boolean => value.is_boolean(),
        }
    }
}

struct RegisteredPreference {
    module: &'static str,
    name: &'static str,
    kind: PreferenceKind,
    default: fn(&Config) -> Value,
}

impl RegisteredPreference {
    /// Storage key, `<module>.<name>`.
    fn key(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }
}

fn default_hide_shared_server(config: &Config) -> Value {
    Value::Bool(config.hide_shared_server)
}

static PREFERENCES: [RegisteredPreference; 1] = [RegisteredPreference {
    module: "browser",
    name: "hide_shared_server",
    kind: PreferenceKind::Boolean,
    default: default_hide_shared_server,
}];

fn lookup(module: &str, name: &str) -> Result<&'static RegisteredPreference, AppError> {
    PREFERENCES
        .iter()
        .find(|pref| pref.module == module && pref.name == name)
        .ok_or_else(|| AppError::NotFound(format!("Preference {}.{} not found", module, name)))
}

pub struct PreferenceService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> PreferenceService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Returns the user's value of a preference, or its default.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Preference is not registered
    pub async fn get(&self, user_id: i32, module: &str, name: &str) -> Result<Value, AppError> {
        let pref = lookup(module, name)?;

        let stored = UserPreferenceRepository::new(self.db)
            .get(user_id, &pref.key())
            .await?;

        let value = stored
            .and_then(|raw| match serde_json::from_str::<Value>(&raw) {
                Ok(value) if pref.kind.accepts(&value) => Some(value),
                _ => {
                    tracing::warn!(
                        "Ignoring invalid stored value of preference {} for user {}",
                        pref.key(),
                        user_id
                    );
                    None
                }
            })
            .unwrap_or_else(|| (pref.default)(self.config));

        Ok(value)
    }

    /// Stores the user's value of a preference.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Preference is not registered
    /// - `Err(AppError::BadRequest)` - Value has the wrong type
    pub async fn set(
        &self,
        user_id: i32,
        module: &str,
        name: &str,
        value: Value,
    ) -> Result<Value, AppError> {
        let pref = lookup(module, name)?;

        if !pref.kind.accepts(&value) {
            return Err(AppError::BadRequest(format!(
                "Invalid value for preference {}",
                pref.key()
            )));
        }

        UserPreferenceRepository::new(self.db)
            .set(user_id, &pref.key(), value.to_string())
            .await?;

        Ok(value)
    }

    /// Whether foreign groups holding shared servers are hidden from the user.
    pub async fn hide_shared_server(&self, user_id: i32) -> Result<bool, AppError> {
        let value = self.get(user_id, "browser", "hide_shared_server").await?;

        Ok(value.as_bool().unwrap_or(self.config.hide_shared_server))
    }
}
