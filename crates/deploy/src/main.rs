use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use footwears_deploy::{logging, registry, run_selected, Config, DryRun, Environment};
use tracing::info;

#[derive(Parser)]
#[command(name = "footwears-deploy")]
#[command(about = "Deployment tooling for the Footwears contract")]
struct Cli {
    /// Debug logging for this crate when RUST_LOG is unset
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the deployment steps matching the given tags
    Deploy {
        /// Network to deploy to (overrides DEPLOY_NETWORK)
        #[arg(short, long)]
        network: Option<String>,
        /// Only run steps carrying one of these tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Next nonce of the deploying accounts
        #[arg(long, default_value_t = 0)]
        nonce: u64,
        /// Print the deployment records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered deployment steps and their tags
    Tags,
    /// Show the resolved configuration
    Config {
        /// Network to resolve (overrides DEPLOY_NETWORK)
        #[arg(short, long)]
        network: Option<String>,
        /// Fail on an invalid configuration instead of printing it
        #[arg(long)]
        validate: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Deploy {
            network,
            tags,
            nonce,
            json,
        } => {
            let config = Config::load_for(network.as_deref())
                .context("failed to load deployment configuration")?;
            info!(network = %config.network, chain_id = config.chain_id, "Deploying");

            let env = Environment::new(config, DryRun::new(nonce));
            let steps = registry();
            let completed = run_selected(&env, &steps, &tags).await?;

            let records = env.backend().records();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!(
                    "Ran {} step(s) on {}: {}",
                    completed.len(),
                    env.config().network,
                    completed.join(", ")
                );
                for record in &records {
                    println!("  {:<18} {}", record.name, record.address);
                }
            }
            Ok(())
        }
        Commands::Tags => {
            for step in registry() {
                println!("{:<18} {}", step.id(), step.tags().join(", "));
            }
            Ok(())
        }
        Commands::Config {
            network,
            validate,
            json,
        } => {
            let config = Config::load_for(network.as_deref())?;
            if validate {
                println!("Configuration is valid");
            } else if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            Ok(())
        }
    }
}
