//! Deploy requests, deployment records, and the capabilities a step runs
//! against.

use crate::accounts::NamedAccounts;
use crate::config::Config;
use alloy_primitives::{Address, B256};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for a single contract deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployOptions {
    /// Account signing and paying for the deployment
    pub from: Address,
    /// Constructor arguments, in order
    pub args: Vec<Value>,
    /// Report the deployment once it completes
    pub log: bool,
}

/// Outcome of a deployment, owned by the deploy capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub name: String,
    pub address: Address,
    pub from: Address,
    pub args: Vec<Value>,
    /// Absent when nothing was broadcast
    pub transaction_hash: Option<B256>,
    pub newly_deployed: bool,
}

/// Capability that deploys a named contract artifact
#[async_trait]
pub trait Deployments: Send + Sync {
    async fn deploy(&self, name: &str, options: DeployOptions) -> Result<Deployment>;
}

/// What a deployment step sees when it runs
#[async_trait]
pub trait DeployContext: Send + Sync {
    /// Role to address mapping for the active network
    async fn get_named_accounts(&self) -> Result<NamedAccounts>;

    fn deployments(&self) -> &dyn Deployments;
}

/// Context backed by resolved configuration and a deploy backend
pub struct Environment<D> {
    config: Config,
    deployments: D,
}

impl<D: Deployments> Environment<D> {
    pub fn new(config: Config, deployments: D) -> Self {
        Self {
            config,
            deployments,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &D {
        &self.deployments
    }
}

#[async_trait]
impl<D: Deployments> DeployContext for Environment<D> {
    async fn get_named_accounts(&self) -> Result<NamedAccounts> {
        Ok(self.config.named_accounts.clone())
    }

    fn deployments(&self) -> &dyn Deployments {
        &self.deployments
    }
}
