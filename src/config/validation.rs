//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0) and parseability (URL, address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: BotConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::BotConfig;
use crate::wallet::types::Pubkey;

/// A single failed semantic check.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &BotConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.rpc.url.parse::<Url>() {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "rpc.url",
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "rpc.url",
            message: e.to_string(),
        }),
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "rpc.timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if config.wallet.address.is_empty() {
        errors.push(ValidationError {
            field: "wallet.address",
            message: "default wallet address is required".to_string(),
        });
    } else if let Err(e) = config.wallet.address.parse::<Pubkey>() {
        errors.push(ValidationError {
            field: "wallet.address",
            message: e.to_string(),
        });
    }

    if config.telegram.poll_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "telegram.poll_timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
