//! Configuration schema.
//!
//! All fields have defaults so a minimal config file works; secrets
//! (bot token, signing key) come from the environment, never from the
//! file. See `validation.rs` for the semantic checks.

use serde::{Deserialize, Serialize};

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub rpc: RpcConfig,
    pub wallet: WalletConfig,
    pub telegram: TelegramConfig,
}

/// Blockchain JSON-RPC endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Node endpoint URL.
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Wallet settings. The signing key itself is environment-only
/// (`WALLET_PRIVATE_KEY`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Default wallet address (base58) used by the /balance command.
    pub address: String,
}

/// Telegram transport settings. The token is environment-only
/// (`TELEGRAM_BOT_TOKEN`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Long-poll timeout passed to getUpdates, in seconds.
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.rpc.url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.rpc.timeout_secs, 30);
        assert_eq!(config.telegram.poll_timeout_secs, 30);
        assert!(config.wallet.address.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BotConfig = toml::from_str(
            r#"
            [wallet]
            address = "11111111111111111111111111111111"

            [rpc]
            url = "http://localhost:8899"
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc.url, "http://localhost:8899");
        assert_eq!(config.rpc.timeout_secs, 30);
        assert_eq!(config.wallet.address, "11111111111111111111111111111111");
    }
}
