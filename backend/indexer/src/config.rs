//! Application configuration loaded from environment variables.

use crate::errors::{IndexerError, Result};

/// Addresses (Strkey) of the four KEY contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractIds {
    pub identity: String,
    pub project: String,
    pub key: String,
    pub sbt: String,
}

impl ContractIds {
    pub fn all(&self) -> Vec<String> {
        vec![
            self.identity.clone(),
            self.project.clone(),
            self.key.clone(),
            self.sbt.clone(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    pub contracts: ContractIds,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                IndexerError::Config(format!("{key} environment variable is required"))
            })
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            rpc_url: or_default("RPC_URL", "https://soroban-testnet.stellar.org"),
            contracts: ContractIds {
                identity: required("IDENTITY_CONTRACT_ID")?,
                project: required("PROJECT_CONTRACT_ID")?,
                key: required("KEY_CONTRACT_ID")?,
                sbt: required("SBT_CONTRACT_ID")?,
            },
            database_url: or_default("DATABASE_URL", "sqlite:./key_events.db"),
            api_port: or_default("API_PORT", "3001")
                .parse()
                .map_err(|_| IndexerError::Config("Invalid API_PORT".to_string()))?,
            poll_interval_secs: or_default("POLL_INTERVAL_SECS", "5")
                .parse()
                .map_err(|_| IndexerError::Config("Invalid POLL_INTERVAL_SECS".to_string()))?,
            events_per_page: or_default("EVENTS_PER_PAGE", "100")
                .parse()
                .map_err(|_| IndexerError::Config("Invalid EVENTS_PER_PAGE".to_string()))?,
            start_ledger: or_default("START_LEDGER", "0")
                .parse()
                .map_err(|_| IndexerError::Config("Invalid START_LEDGER".to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CONTRACTS: [(&str, &str); 4] = [
        ("IDENTITY_CONTRACT_ID", "CIDENTITY"),
        ("PROJECT_CONTRACT_ID", "CPROJECT"),
        ("KEY_CONTRACT_ID", "CKEY"),
        ("SBT_CONTRACT_ID", "CSBT"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_source(source(&CONTRACTS)).unwrap();
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.events_per_page, 100);
        assert_eq!(config.start_ledger, 0);
        assert_eq!(
            config.contracts.all(),
            vec!["CIDENTITY", "CPROJECT", "CKEY", "CSBT"]
        );
    }

    #[test]
    fn missing_contract_id_is_an_error() {
        let err = Config::from_source(source(&CONTRACTS[..3])).unwrap_err();
        assert!(err.to_string().contains("SBT_CONTRACT_ID"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut pairs = CONTRACTS.to_vec();
        pairs.push(("API_PORT", "not-a-port"));
        let err = Config::from_source(source(&pairs)).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }
}
