//! Transfer transaction building and signing.
//!
//! # Responsibilities
//! - Fetch the recent-blockhash freshness token through the gateway
//! - Encode a legacy message with a single System Program transfer
//! - Sign with the sender's keypair and serialize to wire format
//!
//! Encoding and signing are synchronous; the only suspension point is
//! the blockhash fetch.

use crate::wallet::gateway::RpcGateway;
use crate::wallet::types::{Blockhash, Keypair, Pubkey, TransferInstruction, WalletResult};

/// The System Program owns native-token transfers. Its address is the
/// all-zero key.
const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// System Program instruction index for `Transfer`.
const TRANSFER_INDEX: u32 = 2;

/// Builds signed transfer transactions against an injected gateway.
pub struct TxBuilder<'g, G: RpcGateway> {
    gateway: &'g G,
}

impl<'g, G: RpcGateway> TxBuilder<'g, G> {
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// Build and sign a transfer, returning wire-format transaction bytes
    /// ready for submission.
    ///
    /// The blockhash fetch is the single fallible network step; everything
    /// after it is local.
    pub async fn build(
        &self,
        sender: &Keypair,
        recipient: &Pubkey,
        lamports: u64,
    ) -> WalletResult<Vec<u8>> {
        let blockhash = self.gateway.latest_blockhash().await?;

        let instruction = TransferInstruction {
            from: sender.pubkey(),
            to: *recipient,
            lamports,
        };

        Ok(encode_transaction(sender, &instruction, &blockhash))
    }
}

/// Sign and serialize: shortvec signature count, 64-byte ed25519
/// signature, then the message bytes.
pub fn encode_transaction(
    sender: &Keypair,
    instruction: &TransferInstruction,
    blockhash: &Blockhash,
) -> Vec<u8> {
    let message = encode_transfer_message(instruction, blockhash);
    let signature = sender.sign(&message);

    let mut tx = Vec::with_capacity(1 + 64 + message.len());
    append_shortvec_len(&mut tx, 1);
    tx.extend_from_slice(&signature);
    tx.extend_from_slice(&message);
    tx
}

/// Encode a legacy message carrying one System Program transfer.
///
/// Layout: header `[signers, readonly signed, readonly unsigned]`,
/// shortvec account keys, recent blockhash, shortvec of one compiled
/// instruction with data `u32le(2) ‖ u64le(lamports)`.
pub fn encode_transfer_message(instruction: &TransferInstruction, blockhash: &Blockhash) -> Vec<u8> {
    // Account keys must be unique; a self-transfer reuses index 0.
    let mut keys: Vec<[u8; 32]> = vec![instruction.from.to_bytes()];
    let to_index: u8 = if instruction.to == instruction.from {
        0
    } else {
        keys.push(instruction.to.to_bytes());
        1
    };
    keys.push(SYSTEM_PROGRAM_ID);
    let program_index = (keys.len() - 1) as u8;

    let mut message = Vec::with_capacity(3 + 1 + keys.len() * 32 + 32 + 20);

    // Header: one signer, no readonly signed, one readonly unsigned
    // (the System Program).
    message.push(1);
    message.push(0);
    message.push(1);

    append_shortvec_len(&mut message, keys.len());
    for key in &keys {
        message.extend_from_slice(key);
    }

    message.extend_from_slice(&blockhash.to_bytes());

    // One compiled instruction.
    append_shortvec_len(&mut message, 1);
    message.push(program_index);
    append_shortvec_len(&mut message, 2);
    message.push(0);
    message.push(to_index);

    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER_INDEX.to_le_bytes());
    data.extend_from_slice(&instruction.lamports.to_le_bytes());
    append_shortvec_len(&mut message, data.len());
    message.extend_from_slice(&data);

    message
}

/// Compact-u16 length prefix: 7 bits per byte, high bit as continuation.
fn append_shortvec_len(buf: &mut Vec<u8>, len: usize) {
    let mut rem = len as u16;
    loop {
        let mut byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if rem == 0 {
            break;
        }
    }
}
