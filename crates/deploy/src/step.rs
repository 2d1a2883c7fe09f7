//! Deployment step registration and tag selection.

use crate::deployment::DeployContext;
use crate::footwears::Footwears;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// A named, tagged unit of deployment work
#[async_trait]
pub trait DeployStep: Send + Sync {
    /// Identifier used in logs and run reports
    fn id(&self) -> &'static str;

    /// Labels used to select this step, readable without running it
    fn tags(&self) -> &'static [&'static str];

    async fn run(&self, ctx: &dyn DeployContext) -> Result<()>;
}

/// Every step shipped by this crate, in execution order
pub fn registry() -> Vec<Box<dyn DeployStep>> {
    vec![Box::new(Footwears)]
}

/// Steps matching any requested tag; all of them when none is requested
pub fn select<'a>(
    steps: &'a [Box<dyn DeployStep>],
    requested: &[String],
) -> Vec<&'a dyn DeployStep> {
    steps
        .iter()
        .map(|step| step.as_ref())
        .filter(|step| {
            requested.is_empty()
                || step
                    .tags()
                    .iter()
                    .any(|tag| requested.iter().any(|r| r == tag))
        })
        .collect()
}

/// Run the selected steps in order, stopping at the first failure
///
/// Returns the ids of the steps that completed.
pub async fn run_selected(
    ctx: &dyn DeployContext,
    steps: &[Box<dyn DeployStep>],
    requested: &[String],
) -> Result<Vec<&'static str>> {
    let selected = select(steps, requested);
    info!(
        requested = ?requested,
        selected = selected.len(),
        "Running deployment steps"
    );

    let mut completed = Vec::with_capacity(selected.len());
    for step in selected {
        debug!(step = step.id(), tags = ?step.tags(), "Running step");
        step.run(ctx).await?;
        completed.push(step.id());
    }

    Ok(completed)
}
