//! Wallet operations subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key) + config (RPC URL)
//!     → types.rs (key loading, address parsing)
//!     → lamports.rs (SOL ↔ lamport conversion)
//!     → transaction.rs (build, sign, serialize)
//!     → gateway.rs (balance query, blockhash fetch, submission)
//!     → client.rs (facade: get_balance / transfer_funds)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or key material
//! - All RPC calls have a configurable timeout and no retries

pub mod client;
pub mod gateway;
pub mod lamports;
pub mod transaction;
pub mod types;

pub use client::WalletClient;
pub use gateway::{HttpRpcGateway, RpcGateway};
pub use lamports::LAMPORTS_PER_SOL;
pub use types::{Blockhash, Keypair, Pubkey, TransferInstruction, WalletError};
