//! Solana Wallet Bot Library
//!
//! A chat-driven wallet: check a balance, submit a native-token transfer.
//!
//! ```text
//!  Telegram chat ──▶ bot (parse /balance, /transfer; format replies)
//!                       │
//!                       ▼
//!                 wallet::WalletClient (facade)
//!                   ├─ lamports    SOL ↔ lamport conversion
//!                   ├─ transaction build + sign transfer
//!                   └─ gateway     JSON-RPC: balance, blockhash, submit
//!                       │
//!                       ▼
//!                  Solana RPC node
//! ```

pub mod bot;
pub mod config;
pub mod wallet;

pub use config::BotConfig;
pub use wallet::{WalletClient, WalletError};
