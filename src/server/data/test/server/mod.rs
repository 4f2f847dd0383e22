use crate::server::{
    data::server::ServerRepository,
    model::server::{CreateServerParams, UpdateServerParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod list_visible_in_group;
mod shared;
mod update;
