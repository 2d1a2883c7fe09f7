//! Multi-network deployment configuration
//!
//! This module provides typed, validated configuration for the networks a
//! deployment can target. Configuration is resolved in priority order:
//!
//! 1. Environment variables (DEPLOY_*)
//! 2. deploy.toml profile selection
//! 3. Built-in network defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use footwears_deploy::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("Network: {}", config.network);
//! println!("RPC URL: {}", config.rpc_url);
//! # Ok(())
//! # }
//! ```

use crate::accounts::NamedAccounts;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// File looked up in the working directory
pub const CONFIG_FILE: &str = "deploy.toml";

/// Prefix of environment variables overriding a named account
pub const ACCOUNT_ENV_PREFIX: &str = "DEPLOY_ACCOUNT_";

/// Key of the fallback address in a named account entry
const DEFAULT_KEY: &str = "default";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid network: {0}. Must be: localhost, sepolia, or mainnet")]
    InvalidNetwork(String),

    #[error("Invalid address for named account '{role}': {value}")]
    InvalidAddress { role: String, value: String },

    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),

    #[error("deploy.toml not found")]
    MissingConfigFile,

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Supported deployment networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local development node
    Localhost,
    /// Sepolia testnet
    Sepolia,
    /// Ethereum mainnet
    Mainnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Localhost => "localhost",
            Network::Sepolia => "sepolia",
            Network::Mainnet => "mainnet",
        }
    }

    /// Default RPC URL for this network
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Localhost => "http://127.0.0.1:8545",
            Network::Sepolia => "https://rpc.sepolia.org",
            Network::Mainnet => "https://eth.llamarpc.com",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Localhost => 31337,
            Network::Sepolia => 11155111,
            Network::Mainnet => 1,
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "localhost" => Ok(Network::Localhost),
            "sepolia" => Ok(Network::Sepolia),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile definition from deploy.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub network: String,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Contents of deploy.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployToml {
    #[serde(default)]
    pub default: Option<DefaultProfile>,
    #[serde(default)]
    pub profile: HashMap<String, NetworkProfile>,
    /// role -> (network name or "default") -> address
    #[serde(default)]
    pub named_accounts: BTreeMap<String, BTreeMap<String, String>>,
}

impl DeployToml {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Default profile section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub network: Option<String>,
}

/// Resolved runtime configuration with all required fields
#[derive(Debug, Clone)]
pub struct Config {
    /// Active network
    pub network: Network,
    /// RPC endpoint URL
    pub rpc_url: String,
    pub chain_id: u64,
    /// Named accounts resolved for `network`
    pub named_accounts: NamedAccounts,
}

impl Config {
    /// Load configuration from the process environment and deploy.toml
    ///
    /// A `.env` file is loaded first when present. A missing deploy.toml is
    /// not an error; a malformed one is.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(None)
    }

    /// Like [`Config::load`], with `network` taking precedence over DEPLOY_NETWORK
    pub fn load_for(network: Option<&str>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let file = match Self::load_toml() {
            Ok(file) => Some(file),
            Err(ConfigError::MissingConfigFile) => None,
            Err(e) => return Err(e),
        };
        let mut env: HashMap<String, String> = std::env::vars().collect();
        if let Some(network) = network {
            env.insert("DEPLOY_NETWORK".to_string(), network.to_string());
        }

        Self::resolve(file.as_ref(), &env)
    }

    /// Resolve configuration from an optional deploy.toml and an environment
    ///
    /// # Resolution Order
    ///
    /// 1. DEPLOY_NETWORK, else `[default].network`, else localhost
    /// 2. DEPLOY_RPC_URL / DEPLOY_CHAIN_ID, else the matching profile, else
    ///    the network defaults
    /// 3. Named accounts for the network, with DEPLOY_ACCOUNT_<ROLE> on top
    /// 4. Validate
    pub fn resolve(
        file: Option<&DeployToml>,
        env: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let network_name = env
            .get("DEPLOY_NETWORK")
            .cloned()
            .or_else(|| {
                file.and_then(|f| f.default.as_ref())
                    .and_then(|d| d.network.clone())
            })
            .unwrap_or_else(|| Network::Localhost.as_str().to_string());

        let profile = file.and_then(|f| f.profile.get(network_name.as_str()));
        let network = match profile {
            Some(p) => p.network.parse::<Network>()?,
            None => network_name.parse::<Network>()?,
        };

        let rpc_url = env
            .get("DEPLOY_RPC_URL")
            .cloned()
            .or_else(|| profile.and_then(|p| p.rpc_url.clone()))
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        let chain_id = match env.get("DEPLOY_CHAIN_ID") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidChainId(raw.clone()))?,
            None => profile
                .and_then(|p| p.chain_id)
                .unwrap_or_else(|| network.chain_id()),
        };

        let mut named_accounts = match file {
            Some(f) => {
                Self::resolve_named_accounts(&f.named_accounts, &network_name, network)?
            }
            None => NamedAccounts::new(),
        };
        for (role, value) in account_overrides(env) {
            let address = parse_address(&role, value)?;
            named_accounts.insert(role, address);
        }

        Self::validate(&rpc_url, chain_id)?;

        Ok(Config {
            network,
            rpc_url,
            chain_id,
            named_accounts,
        })
    }

    /// Pick each role's address for the selected profile, then its network,
    /// falling back to the role's default
    fn resolve_named_accounts(
        table: &BTreeMap<String, BTreeMap<String, String>>,
        profile: &str,
        network: Network,
    ) -> Result<NamedAccounts, ConfigError> {
        let mut accounts = NamedAccounts::new();
        for (role, entries) in table {
            let value = entries
                .get(profile)
                .or_else(|| entries.get(network.as_str()))
                .or_else(|| entries.get(DEFAULT_KEY));
            if let Some(value) = value {
                accounts.insert(role.clone(), parse_address(role, value)?);
            }
        }
        Ok(accounts)
    }

    /// Load deploy.toml from the working directory
    fn load_toml() -> Result<DeployToml, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            return DeployToml::from_path(path);
        }
        Err(ConfigError::MissingConfigFile)
    }

    /// Validate configuration values
    fn validate(rpc_url: &str, chain_id: u64) -> Result<(), ConfigError> {
        if rpc_url.is_empty() {
            return Err(ConfigError::MissingField("rpc_url".to_string()));
        }

        if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "RPC URL must start with http:// or https://: {}",
                rpc_url
            )));
        }

        if chain_id == 0 {
            return Err(ConfigError::InvalidChainId("0".to_string()));
        }

        Ok(())
    }

    /// Print the resolved configuration
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║         DEPLOYMENT CONFIGURATION RESOLVED                      ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Network:             {}", self.network);
        println!("  RPC URL:             {}", self.rpc_url);
        println!("  Chain ID:            {}", self.chain_id);

        if self.named_accounts.is_empty() {
            println!("  Named accounts:      (not configured)");
        } else {
            println!("  Named accounts:");
            for (role, address) in self.named_accounts.iter() {
                println!("    {:<18} {}", role, address);
            }
        }

        println!("╚════════════════════════════════════════════════════════════════╝");
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("network", &self.network.to_string())?;
        map.serialize_entry("rpc_url", &self.rpc_url)?;
        map.serialize_entry("chain_id", &self.chain_id)?;
        map.serialize_entry("named_accounts", &self.named_accounts)?;
        map.end()
    }
}

/// DEPLOY_ACCOUNT_<ROLE> overrides as (lower-cased role, value)
///
/// Keys spelled entirely in upper case are applied last, so they win over
/// other spellings of the same role. Empty role names are ignored.
fn account_overrides(env: &HashMap<String, String>) -> Vec<(String, &str)> {
    let mut overrides: Vec<(&str, &str)> = env
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(ACCOUNT_ENV_PREFIX)
                .filter(|role| !role.is_empty())
                .map(|_| (key.as_str(), value.as_str()))
        })
        .collect();
    overrides.sort_by_key(|(key, _)| (key.to_uppercase() == *key, *key));

    overrides
        .into_iter()
        .map(|(key, value)| (key[ACCOUNT_ENV_PREFIX.len()..].to_lowercase(), value))
        .collect()
}

fn parse_address(role: &str, value: &str) -> Result<Address, ConfigError> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|_| ConfigError::InvalidAddress {
            role: role.to_string(),
            value: value.to_string(),
        })
}
