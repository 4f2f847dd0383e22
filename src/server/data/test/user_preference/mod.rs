use crate::server::data::user_preference::UserPreferenceRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod set;
