use crate::server::{
    config::Config, data::user_preference::UserPreferenceRepository, error::AppError,
    service::preference::PreferenceService,
};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
