//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`
//! sockets. All functions are synchronous and take data in, returning data out.

pub mod address;
pub mod config;
pub mod error;
pub mod fragment;
pub mod site;
pub mod users;

pub use config::{VhostConfig, validate_config_key, validate_config_value};
pub use error::{
    CertError, ConfigError, OperatorError, PrivilegeError, SiteError, UserError, WebServerError,
};
pub use site::{Site, SiteEntry, SiteLayout, validate_site_name};
