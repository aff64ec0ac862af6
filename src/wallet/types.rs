//! Wallet domain types and error definitions.
//!
//! # Security
//! - Key material is parsed once, at `Keypair` construction
//! - Secrets are never logged or included in `Debug` output

use ed25519_dalek::{Signer, SigningKey};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable holding the hex-encoded signing key.
pub const PRIVATE_KEY_ENV_VAR: &str = "WALLET_PRIVATE_KEY";

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Amount is zero, negative, or does not fit in base units.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Recipient address failed to decode or validate.
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(#[from] PubkeyError),

    /// Key material is malformed (wrong length, non-hex, mismatched pubkey).
    #[error("signing failure: {0}")]
    Signing(String),

    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("RPC unavailable: {0}")]
    RpcUnavailable(String),

    /// Node explicitly rejected the transaction.
    #[error("transaction rejected by node: {0}")]
    RpcRejected(String),

    /// Response shape violates the expected JSON-RPC contract.
    #[error("malformed RPC response: {0}")]
    RpcMalformedResponse(String),

    /// Generic node-reported error on a read call.
    #[error("node error {code}: {message}")]
    RpcError { code: i64, message: String },
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors from parsing a base58 public key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PubkeyError {
    #[error("not valid base58")]
    Encoding,

    #[error("decoded to {0} bytes, expected 32")]
    WrongLength(usize),
}

/// A 32-byte on-chain account identifier, base58 on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl FromStr for Pubkey {
    type Err = PubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|_| PubkeyError::Encoding)?;
        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| PubkeyError::WrongLength(decoded.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

/// A 32-byte recent-blockhash freshness token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blockhash([u8; 32]);

impl Blockhash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Decode from the base58 string the node returns. `None` if the
    /// string is not base58 or not 32 bytes.
    pub fn from_base58(s: &str) -> Option<Self> {
        let decoded = bs58::decode(s).into_vec().ok()?;
        let bytes: [u8; 32] = decoded.as_slice().try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

/// A single native-token transfer, created per call and discarded after
/// submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferInstruction {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
}

/// An ed25519 keypair for transaction signing.
///
/// Built from hex configuration material: either a 64-byte Solana-style
/// secret key (seed followed by public key) or a bare 32-byte seed. The
/// embedded public key, when present, must match the derived one.
pub struct Keypair {
    signing: SigningKey,
    pubkey: Pubkey,
}

impl Keypair {
    /// Parse hex key material. This is the only place raw secret bytes
    /// are handled; everything downstream sees only the `Keypair`.
    pub fn from_hex(material: &str) -> WalletResult<Self> {
        let bytes = hex::decode(material.trim())
            .map_err(|e| WalletError::Signing(format!("key material is not hex: {}", e)))?;

        let seed: [u8; 32] = match bytes.len() {
            32 | 64 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes[..32]);
                seed
            }
            n => {
                return Err(WalletError::Signing(format!(
                    "key material must be 32 or 64 bytes, got {}",
                    n
                )))
            }
        };

        let signing = SigningKey::from_bytes(&seed);
        let derived = signing.verifying_key().to_bytes();

        if bytes.len() == 64 && bytes[32..] != derived[..] {
            return Err(WalletError::Signing(
                "embedded public key does not match derived key".to_string(),
            ));
        }

        Ok(Self {
            signing,
            pubkey: Pubkey::new(derived),
        })
    }

    /// Load the keypair from the `WALLET_PRIVATE_KEY` environment variable.
    pub fn from_env() -> WalletResult<Self> {
        let material = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            WalletError::Signing(format!(
                "environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;
        Self::from_hex(&material)
    }

    /// The derived public address of this keypair.
    pub fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    /// Sign a serialized message.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing.sign(message).to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret is deliberately omitted.
        f.debug_struct("Keypair").field("pubkey", &self.pubkey).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Verifier, VerifyingKey};

    const TEST_SEED: [u8; 32] = [7u8; 32];

    fn test_seed_hex() -> String {
        hex::encode(TEST_SEED)
    }

    #[test]
    fn test_pubkey_roundtrip() {
        let pubkey = Pubkey::new([42u8; 32]);
        let encoded = pubkey.to_string();
        let parsed: Pubkey = encoded.parse().unwrap();
        assert_eq!(parsed, pubkey);
    }

    #[test]
    fn test_pubkey_rejects_bad_encoding() {
        let result = "!!not-base58!!".parse::<Pubkey>();
        assert_eq!(result.unwrap_err(), PubkeyError::Encoding);
    }

    #[test]
    fn test_pubkey_rejects_wrong_length() {
        let short = bs58::encode([1u8; 16]).into_string();
        let result = short.parse::<Pubkey>();
        assert_eq!(result.unwrap_err(), PubkeyError::WrongLength(16));
    }

    #[test]
    fn test_keypair_from_seed_hex() {
        let keypair = Keypair::from_hex(&test_seed_hex()).unwrap();
        // Derived pubkey must verify a signature over arbitrary bytes.
        let message = b"freshness";
        let signature = keypair.sign(message);
        let verifying = VerifyingKey::from_bytes(&keypair.pubkey().to_bytes()).unwrap();
        assert!(verifying
            .verify(message, &ed25519_dalek::Signature::from_bytes(&signature))
            .is_ok());
    }

    #[test]
    fn test_keypair_from_full_secret_key() {
        let keypair = Keypair::from_hex(&test_seed_hex()).unwrap();
        let full = format!(
            "{}{}",
            test_seed_hex(),
            hex::encode(keypair.pubkey().to_bytes())
        );
        let reparsed = Keypair::from_hex(&full).unwrap();
        assert_eq!(reparsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_keypair_rejects_mismatched_pubkey() {
        let full = format!("{}{}", test_seed_hex(), hex::encode([9u8; 32]));
        let result = Keypair::from_hex(&full);
        assert!(matches!(result, Err(WalletError::Signing(_))));
    }

    #[test]
    fn test_keypair_rejects_bad_length() {
        let result = Keypair::from_hex(&hex::encode([1u8; 31]));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be 32 or 64 bytes"));
    }

    #[test]
    fn test_keypair_rejects_non_hex() {
        let result = Keypair::from_hex("zz-definitely-not-hex");
        assert!(matches!(result, Err(WalletError::Signing(_))));
    }

    #[test]
    fn test_keypair_debug_hides_secret() {
        let keypair = Keypair::from_hex(&test_seed_hex()).unwrap();
        let debug = format!("{:?}", keypair);
        assert!(!debug.contains(&test_seed_hex()));
        assert!(debug.contains("pubkey"));
    }

    #[test]
    fn test_blockhash_from_base58() {
        let encoded = bs58::encode([3u8; 32]).into_string();
        let hash = Blockhash::from_base58(&encoded).unwrap();
        assert_eq!(hash.to_bytes(), [3u8; 32]);

        assert!(Blockhash::from_base58("too-short").is_none());
    }

    #[test]
    fn test_error_display() {
        let err = WalletError::RpcError {
            code: -32002,
            message: "blockhash expired".to_string(),
        };
        assert_eq!(err.to_string(), "node error -32002: blockhash expired");
    }
}
