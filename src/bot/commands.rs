//! Chat command parsing and reply formatting.
//!
//! # Responsibilities
//! - Parse `/start`, `/help`, `/balance`, `/transfer <recipient> <amount>`
//! - Enforce argument counts before the core is touched
//! - Render success values and `WalletError` kinds as user-facing text
//!
//! No domain logic lives here; everything is delegated to the wallet
//! operations client.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::wallet::gateway::RpcGateway;
use crate::wallet::types::{Keypair, Pubkey, WalletError};
use crate::wallet::WalletClient;

/// Help text shown by /start and /help.
pub const HELP_TEXT: &str = "Available commands:\n\
    /balance - Check your wallet balance.\n\
    /transfer <recipient> <amount> - Transfer SOL to another wallet.\n\
    /help - Show this message.";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Balance,
    Transfer { recipient: String, amount: Decimal },
}

/// Errors produced while parsing a command message. The display text is
/// the user-facing reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: /transfer <recipient> <amount>")]
    TransferUsage,

    #[error("Amount must be a number.")]
    BadAmount,

    #[error("Unknown command. Use /help to see available commands.")]
    Unknown,
}

impl Command {
    /// Parse a message. `None` means the text is not a command and
    /// should be ignored.
    pub fn parse(text: &str) -> Option<Result<Self, CommandError>> {
        let trimmed = text.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let mut parts = trimmed.split_whitespace();
        let head = parts.next()?;
        // In group chats Telegram appends the bot name: /balance@my_bot.
        let name = head.split_once('@').map_or(head, |(name, _)| name);

        let result = match name {
            "/start" => Ok(Command::Start),
            "/help" => Ok(Command::Help),
            "/balance" => Ok(Command::Balance),
            "/transfer" => {
                let args: Vec<&str> = parts.collect();
                if args.len() != 2 {
                    return Some(Err(CommandError::TransferUsage));
                }
                match Decimal::from_str(args[1]) {
                    Ok(amount) => Ok(Command::Transfer {
                        recipient: args[0].to_string(),
                        amount,
                    }),
                    Err(_) => Err(CommandError::BadAmount),
                }
            }
            _ => Err(CommandError::Unknown),
        };

        Some(result)
    }
}

/// Everything a command needs to execute: the wallet facade plus the
/// configured default wallet.
pub struct BotContext<G: RpcGateway> {
    pub client: WalletClient<G>,
    pub wallet_address: Pubkey,
    pub keypair: Keypair,
}

/// Execute one message. `None` means no reply is warranted.
pub async fn respond<G: RpcGateway>(ctx: &BotContext<G>, text: &str) -> Option<String> {
    let command = match Command::parse(text)? {
        Ok(command) => command,
        Err(e) => return Some(e.to_string()),
    };

    let reply = match command {
        Command::Start => {
            "Welcome to the Solana wallet bot! Use /help to see available commands.".to_string()
        }
        Command::Help => HELP_TEXT.to_string(),
        Command::Balance => match ctx.client.get_balance(&ctx.wallet_address).await {
            Ok(sol) => format!("Your balance: {} SOL", sol),
            Err(e) => error_reply(&e),
        },
        Command::Transfer { recipient, amount } => {
            match ctx.client.transfer_funds(&ctx.keypair, &recipient, amount).await {
                Ok(signature) => format!("Transaction successful! TX ID: {}", signature),
                Err(e) => error_reply(&e),
            }
        }
    };

    Some(reply)
}

/// Map an error kind to a user-facing message. The match is on the
/// variant, not the message text.
pub fn error_reply(err: &WalletError) -> String {
    match err {
        WalletError::InvalidAmount(_) => "Amount must be greater than 0.".to_string(),
        WalletError::InvalidRecipient(_) => "That recipient address is not valid.".to_string(),
        WalletError::Signing(_) => "The configured wallet key is invalid.".to_string(),
        WalletError::RpcUnavailable(_) => {
            "The network is unreachable right now. Try again later.".to_string()
        }
        WalletError::RpcRejected(reason) => {
            format!("The network rejected the transaction: {}", reason)
        }
        WalletError::RpcMalformedResponse(_) => {
            "Got an unexpected response from the network.".to_string()
        }
        WalletError::RpcError { message, .. } => format!("Node error: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::types::PubkeyError;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/start"), Some(Ok(Command::Start)));
        assert_eq!(Command::parse("/help"), Some(Ok(Command::Help)));
        assert_eq!(Command::parse("  /balance  "), Some(Ok(Command::Balance)));
    }

    #[test]
    fn test_parse_strips_bot_mention() {
        assert_eq!(Command::parse("/balance@wallet_bot"), Some(Ok(Command::Balance)));
    }

    #[test]
    fn test_non_command_text_is_ignored() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(Command::parse("/dance"), Some(Err(CommandError::Unknown)));
    }

    #[test]
    fn test_transfer_parses_recipient_and_amount() {
        let parsed = Command::parse("/transfer abc123 1.5");
        assert_eq!(
            parsed,
            Some(Ok(Command::Transfer {
                recipient: "abc123".to_string(),
                amount: Decimal::from_str("1.5").unwrap(),
            }))
        );
    }

    #[test]
    fn test_transfer_wrong_arg_count_is_usage_error() {
        assert_eq!(
            Command::parse("/transfer abc123"),
            Some(Err(CommandError::TransferUsage))
        );
        assert_eq!(
            Command::parse("/transfer a b c"),
            Some(Err(CommandError::TransferUsage))
        );
        assert_eq!(
            Command::parse("/transfer"),
            Some(Err(CommandError::TransferUsage))
        );
    }

    #[test]
    fn test_transfer_non_numeric_amount() {
        assert_eq!(
            Command::parse("/transfer abc123 lots"),
            Some(Err(CommandError::BadAmount))
        );
    }

    #[test]
    fn test_error_reply_matches_on_kind() {
        let reply = error_reply(&WalletError::InvalidRecipient(PubkeyError::Encoding));
        assert_eq!(reply, "That recipient address is not valid.");

        let reply = error_reply(&WalletError::RpcUnavailable("connection refused".to_string()));
        assert!(reply.contains("unreachable"));

        let reply = error_reply(&WalletError::RpcRejected("insufficient funds".to_string()));
        assert!(reply.contains("insufficient funds"));
    }
}
