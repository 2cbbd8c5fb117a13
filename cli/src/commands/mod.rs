//! Command implementations

pub mod config;
pub mod create;
pub mod reload;
pub mod sites;
pub mod users;
pub mod version;
