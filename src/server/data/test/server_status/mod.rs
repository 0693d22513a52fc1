use crate::server::{
    data::server_status::ServerStatusRepository,
    error::AppError,
    model::server_status::{PlayerSample, ServerStatus, Version},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_all;
mod update;
