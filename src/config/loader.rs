//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::BotConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BotConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BotConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/nonexistent/wallet-bot.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_validation_errors_join_in_display() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "rpc.url",
                message: "unsupported scheme 'ftp'".to_string(),
            },
            ValidationError {
                field: "wallet.address",
                message: "default wallet address is required".to_string(),
            },
        ]);

        let text = err.to_string();
        assert!(text.starts_with("validation failed: "));
        assert!(text.contains("rpc.url: unsupported scheme 'ftp'"));
        assert!(text.contains("wallet.address: default wallet address is required"));
    }
}
