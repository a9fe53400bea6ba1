//! Radar Core - shared configuration for the Radar repository dashboard
//!
//! This crate loads the configuration file and the GitHub credential that the
//! API access layer and the command line share.

pub mod config;
pub mod error;
pub mod secrets;

pub use config::{Config, GitHubSettings};
pub use error::{Error, Result};
pub use secrets::{GitHubSecrets, Secrets};
