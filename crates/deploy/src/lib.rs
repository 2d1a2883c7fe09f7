//! Footwears deployment tooling
//!
//! Registers the Footwears deployment step and provides the configuration,
//! named-account resolution, and deploy backends it runs against.

pub mod accounts;
pub mod config;
pub mod deployment;
pub mod dry_run;
pub mod footwears;
pub mod logging;
pub mod step;

pub use accounts::{AccountError, NamedAccounts};
pub use config::{Config, ConfigError, Network};
pub use deployment::{DeployContext, DeployOptions, Deployment, Deployments, Environment};
pub use dry_run::DryRun;
pub use footwears::Footwears;
pub use step::{registry, run_selected, select, DeployStep};
