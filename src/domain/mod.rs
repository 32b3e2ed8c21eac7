//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod layout;
pub mod outcome;
pub mod proxy;
pub mod request;

pub use config::{InstallerConfig, LayoutMode};
pub use error::{
    CommandError, ConfigError, HookError, ReloadError, RequestError, StoreError, ValidateError,
};
pub use layout::{MaterialPart, TargetFile, TargetLayout};
pub use outcome::{DeployStage, DeploymentOutcome, DeploymentStatus, StageFailure};
pub use proxy::{ProxyHandle, ServiceAction};
pub use request::{DeploymentRequest, validate_domain};
