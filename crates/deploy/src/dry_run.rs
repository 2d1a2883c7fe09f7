//! Deploy backend that broadcasts nothing.
//!
//! Each request is recorded and given the address a CREATE transaction from
//! the same sender would produce, starting at the configured nonce. The
//! deployment log line goes to stderr unless another writer is supplied, so
//! stdout is left to the caller.

use crate::deployment::{DeployOptions, Deployment, Deployments};
use alloy_primitives::Address;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use tracing::info;

#[derive(Default)]
struct State {
    nonces: HashMap<Address, u64>,
    records: Vec<Deployment>,
}

/// Records deployments and predicts their addresses
pub struct DryRun {
    start_nonce: u64,
    state: Mutex<State>,
    log: Mutex<Box<dyn Write + Send>>,
}

impl DryRun {
    /// `start_nonce` is the next nonce of every sender
    pub fn new(start_nonce: u64) -> Self {
        Self {
            start_nonce,
            state: Mutex::default(),
            log: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Send deployment log lines to `writer` instead of stderr
    pub fn with_log_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.log = Mutex::new(Box::new(writer));
        self
    }

    /// Recorded deployments, in call order
    ///
    /// Records survive a panic in another holder of the lock.
    pub fn records(&self) -> Vec<Deployment> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }
}

impl Default for DryRun {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl Deployments for DryRun {
    async fn deploy(&self, name: &str, options: DeployOptions) -> Result<Deployment> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("dry-run state poisoned"))?;

        let nonce = state.nonces.entry(options.from).or_insert(self.start_nonce);
        let next = nonce
            .checked_add(1)
            .ok_or_else(|| anyhow!("nonce of {} exhausted at {}", options.from, *nonce))?;
        let address = options.from.create(*nonce);
        *nonce = next;

        let deployment = Deployment {
            name: name.to_string(),
            address,
            from: options.from,
            args: options.args,
            transaction_hash: None,
            newly_deployed: true,
        };

        if options.log {
            info!(
                contract = name,
                from = %deployment.from,
                address = %deployment.address,
                "Deployment planned"
            );
            let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = writeln!(
                log,
                "deploying \"{}\" from {}: predicted at {}",
                name, deployment.from, deployment.address
            );
        }

        state.records.push(deployment.clone());
        Ok(deployment)
    }
}
