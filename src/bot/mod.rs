//! Chat layer: command routing and the Telegram transport.
//!
//! # Data Flow
//! ```text
//! Telegram getUpdates (telegram.rs)
//!     → commands.rs (parse, argument checks)
//!     → wallet::WalletClient (domain logic)
//!     → commands.rs (reply formatting)
//!     → Telegram sendMessage (telegram.rs)
//! ```
//!
//! This layer holds no domain logic: it parses, dispatches, and formats.

pub mod commands;
pub mod telegram;

pub use commands::{BotContext, Command};
pub use telegram::TelegramApi;
