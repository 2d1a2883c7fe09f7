//! Deploys the Footwears contract from the `deployer` account.

use crate::deployment::{DeployContext, DeployOptions};
use crate::step::DeployStep;
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

pub const CONTRACT_NAME: &str = "Footwears";

/// Named account that signs the deployment
pub const DEPLOYER_ROLE: &str = "deployer";

pub const TAGS: &[&str] = &["Footwears"];

/// Deploys `Footwears` with no constructor arguments
#[derive(Debug, Clone, Copy, Default)]
pub struct Footwears;

#[async_trait]
impl DeployStep for Footwears {
    fn id(&self) -> &'static str {
        CONTRACT_NAME
    }

    fn tags(&self) -> &'static [&'static str] {
        TAGS
    }

    async fn run(&self, ctx: &dyn DeployContext) -> Result<()> {
        let deployer = ctx.get_named_accounts().await?.get(DEPLOYER_ROLE)?;
        debug!(%deployer, contract = CONTRACT_NAME, "Resolved deployer");

        ctx.deployments()
            .deploy(
                CONTRACT_NAME,
                DeployOptions {
                    from: deployer,
                    args: vec![],
                    log: true,
                },
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountError, NamedAccounts};
    use crate::deployment::{Deployment, Deployments};
    use alloy_primitives::{address, Address};
    use std::sync::Mutex;
    use thiserror::Error;

    #[derive(Error, Debug, PartialEq)]
    #[error("insufficient funds for gas * price + value")]
    struct InsufficientFunds;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, DeployOptions)>>,
        fail: bool,
    }

    #[async_trait]
    impl Deployments for Recorder {
        async fn deploy(&self, name: &str, options: DeployOptions) -> Result<Deployment> {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), options.clone()));
            if self.fail {
                return Err(InsufficientFunds.into());
            }
            Ok(Deployment {
                name: name.to_string(),
                address: Address::repeat_byte(0xfe),
                from: options.from,
                args: options.args,
                transaction_hash: None,
                newly_deployed: true,
            })
        }
    }

    struct Context {
        accounts: NamedAccounts,
        deployments: Recorder,
    }

    #[async_trait]
    impl DeployContext for Context {
        async fn get_named_accounts(&self) -> Result<NamedAccounts> {
            Ok(self.accounts.clone())
        }

        fn deployments(&self) -> &dyn Deployments {
            &self.deployments
        }
    }

    const DEPLOYER: Address = address!("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");

    fn context(accounts: NamedAccounts, fail: bool) -> Context {
        Context {
            accounts,
            deployments: Recorder {
                fail,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_tags_are_footwears_only() {
        assert_eq!(Footwears.tags(), &["Footwears"]);
        assert_eq!(Footwears.id(), "Footwears");
    }

    #[tokio::test]
    async fn test_run_deploys_once_from_deployer() {
        let ctx = context([("deployer", DEPLOYER)].into_iter().collect(), false);

        Footwears.run(&ctx).await.unwrap();

        let calls = ctx.deployments.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(
                "Footwears".to_string(),
                DeployOptions {
                    from: DEPLOYER,
                    args: vec![],
                    log: true,
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_run_ignores_other_roles() {
        let accounts = [
            ("deployer", DEPLOYER),
            ("treasury", Address::repeat_byte(0x22)),
        ]
        .into_iter()
        .collect();
        let ctx = context(accounts, false);

        Footwears.run(&ctx).await.unwrap();

        let calls = ctx.deployments.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.from, DEPLOYER);
    }

    #[tokio::test]
    async fn test_missing_deployer_fails_before_deploy() {
        let ctx = context(
            [("treasury", Address::repeat_byte(0x22))].into_iter().collect(),
            false,
        );

        let err = Footwears.run(&ctx).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<AccountError>(),
            Some(&AccountError::Unknown("deployer".to_string()))
        );
        assert!(ctx.deployments.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_error_propagates_unmodified() {
        let ctx = context([("deployer", DEPLOYER)].into_iter().collect(), true);

        let err = Footwears.run(&ctx).await.unwrap_err();

        assert_eq!(err.downcast_ref::<InsufficientFunds>(), Some(&InsufficientFunds));
        assert_eq!(format!("{:#}", err), "insufficient funds for gas * price + value");
        assert_eq!(ctx.deployments.calls.lock().unwrap().len(), 1);
    }
}
