use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        auth::AuthSourceKind,
        user::{CreateUserParam, ROLE_USER},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod update_password;
