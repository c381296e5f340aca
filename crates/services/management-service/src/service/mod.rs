//! Service layer - business logic orchestration.

mod management_service;
mod projects;
mod tasks;
mod users;

pub use management_service::{ManagementService, ServiceConfig};
