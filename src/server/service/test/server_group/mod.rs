use crate::server::{
    config::Config,
    error::AppError,
    service::server_group::{ServerGroupService, SERVER_GROUP_NODE},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_all_server_groups;
mod nodes;
mod update;
