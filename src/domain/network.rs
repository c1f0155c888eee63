use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Ledger network a run targets
///
/// Transactions are encoded as intent-prefixed canonical JSON and addresses
/// are SHA-256 digests of the public key, so only nodes that accept that
/// encoding, such as a local emulator node, can execute them. Public
/// network nodes reject these transactions. `Localnet` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    /// Default JSON-RPC endpoint of the network's full nodes
    pub fn node_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet.iota.cafe",
            Self::Testnet => "https://api.testnet.iota.cafe",
            Self::Devnet => "https://api.devnet.iota.cafe",
            Self::Localnet => "http://127.0.0.1:9000",
        }
    }

    /// Faucet host, if the network hands out test funds
    pub fn faucet_url(&self) -> Option<&'static str> {
        match self {
            Self::Mainnet => None,
            Self::Testnet => Some("https://faucet.testnet.iota.cafe"),
            Self::Devnet => Some("https://faucet.devnet.iota.cafe"),
            Self::Localnet => Some("http://127.0.0.1:9123"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Localnet => "localnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "localnet" => Ok(Self::Localnet),
            other => Err(Error::Config(format!("unknown network: {other}"))),
        }
    }
}
